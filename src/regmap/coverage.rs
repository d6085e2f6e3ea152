use super::error::Finding;
use super::model::Field;

/// Returns the bit ranges `[lo, hi)` between the first and last declared
/// field that no field covers.
///
/// Bits below the first field and above the last one are never reported.
/// Fields with missing or malformed numbers are left out.
pub fn find_holes(fields: &[Field]) -> Vec<(u64, u64)> {
    let mut spans: Vec<(u64, u64)> = fields
        .iter()
        .filter_map(|f| f.bits().ok())
        .map(|(lsb, width)| (lsb, lsb.saturating_add(width)))
        .collect();
    spans.sort_by_key(|&(lsb, _)| lsb);

    let mut gaps = vec![];
    let mut previous_end: Option<u64> = None;
    for (lsb, end) in spans {
        let next_end = match previous_end {
            Some(prev) => {
                if lsb > prev {
                    gaps.push((prev, lsb));
                }
                prev.max(end)
            }
            None => end,
        };
        previous_end = Some(next_end);
    }
    gaps
}

/// Adds one advisory listing every hole in the register's field layout.
pub fn check_field_holes(fields: &[Field], width: u64, path: &str, warnings: &mut Vec<Finding>) {
    let gaps = find_holes(fields);
    if !gaps.is_empty() {
        warnings.push(Finding::FieldHole {
            path: path.into(),
            width,
            gaps,
        });
    }
}

use log::debug;

use super::error::Finding;
use super::model::Field;

/// Bits `[lo, hi)` claimed by a field with the given `lsb` and `width`.
///
/// A field claims at most 64 bits: one of width 64 or more is checked as if
/// it were exactly 64 bits wide. Positions themselves are not bounded.
pub fn field_span(lsb: u64, width: u64) -> (u64, u64) {
    (lsb, lsb.saturating_add(width.min(64)))
}

/// Reports every field whose bits intersect a field declared before it.
///
/// Each overlapping pair is reported once, against the later field. Fields
/// with a missing or malformed `lsb` or `width` are reported and then
/// ignored.
pub fn check_field_overlaps(fields: &[Field], path: &str, errors: &mut Vec<Finding>) {
    let mut used: Vec<(u64, u64)> = vec![];
    for f in fields {
        let (lsb, width) = match f.bits() {
            Ok(bits) => bits,
            Err((attr, error)) => {
                errors.push(Finding::attribute(
                    format!("{}.{}", path, f.name),
                    attr,
                    error,
                ));
                continue;
            }
        };

        let (lo, hi) = field_span(lsb, width);
        if used.iter().any(|&(ulo, uhi)| lo < uhi && ulo < hi) {
            debug!("{}: {} overlaps bits {:?}", path, f.name, used);
            errors.push(Finding::FieldOverlap {
                path: path.into(),
                field: f.name.clone(),
                lsb,
                width,
            });
        }
        if lo < hi {
            used.push((lo, hi));
        }
    }
}

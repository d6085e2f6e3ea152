use std::fmt::{Display, Formatter};

/// Largest `count` an array register may declare. Every instance is held in
/// memory while its block is checked.
pub const MAX_ARRAY_INSTANCES: u64 = 1 << 20;

/// A value that could not be read as an unsigned integer.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedNumber {
    /// The offending value, rendered as it appeared in the document.
    pub value: String,
}

impl MalformedNumber {
    pub fn new(value: String) -> MalformedNumber {
        MalformedNumber { value }
    }
}

impl Display for MalformedNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not an unsigned integer", self.value)
    }
}

/// Why a required numeric attribute could not be read.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrError {
    Missing,
    Malformed(MalformedNumber),
}

/// Everything the validator can say about one device document.
///
/// All variants other than [`Finding::FieldHole`] are errors and fail the
/// device. Holes are advisory.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    /// `path` locates the attribute, e.g. `i225.MAC_CTRL.CTRL.SLU`.
    MalformedNumber {
        path: String,
        attr: &'static str,
        error: MalformedNumber,
    },
    MissingAttribute {
        path: String,
        attr: &'static str,
    },
    SchemaNonconformance {
        source: String,
        message: String,
    },
    FieldOverlap {
        path: String,
        field: String,
        lsb: u64,
        width: u64,
    },
    OffsetCollision {
        device: String,
        block: String,
        offset: u64,
        instance: String,
        occupant: String,
    },
    OffsetOverflow {
        device: String,
        block: String,
        instance: String,
    },
    /// An array register with more instances than the checker expands.
    ArrayTooLarge {
        device: String,
        block: String,
        register: String,
        count: u64,
    },
    /// The document could not be read, parsed, or mapped onto the register
    /// map records.
    Document {
        source: String,
        message: String,
    },
    FieldHole {
        path: String,
        width: u64,
        gaps: Vec<(u64, u64)>,
    },
}

impl Finding {
    /// The finding for a required attribute at `path` that is missing or
    /// malformed.
    pub fn attribute(path: String, attr: &'static str, error: AttrError) -> Finding {
        match error {
            AttrError::Missing => Finding::MissingAttribute { path, attr },
            AttrError::Malformed(error) => Finding::MalformedNumber { path, attr, error },
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Finding::FieldHole { .. })
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::MalformedNumber { path, attr, error } => {
                write!(f, "Malformed number in {}: {} {}", path, attr, error)
            }
            Finding::MissingAttribute { path, attr } => {
                write!(f, "Missing attribute in {}: {}", path, attr)
            }
            Finding::SchemaNonconformance { source, message } => {
                write!(f, "Schema validation error in {}: {}", source, message)
            }
            Finding::FieldOverlap {
                path,
                field,
                lsb,
                width,
            } => write!(
                f,
                "Overlap in {}: field {} (lsb={}, width={}) overlaps previous fields",
                path, field, lsb, width
            ),
            Finding::OffsetCollision {
                device,
                block,
                offset,
                instance,
                occupant,
            } => write!(
                f,
                "Duplicate absolute offset 0x{:X} in block {} ({}): {} vs {}",
                offset, block, device, instance, occupant
            ),
            Finding::OffsetOverflow {
                device,
                block,
                instance,
            } => write!(
                f,
                "Absolute offset of {} in block {} ({}) does not fit in 64 bits",
                instance, block, device
            ),
            Finding::ArrayTooLarge {
                device,
                block,
                register,
                count,
            } => write!(
                f,
                "Array {} in block {} ({}) has {} instances, more than the {} that are checked",
                register, block, device, count, MAX_ARRAY_INSTANCES
            ),
            Finding::Document { source, message } => {
                write!(f, "Could not load {}: {}", source, message)
            }
            Finding::FieldHole { path, width, gaps } => {
                let gaps: Vec<String> = gaps
                    .iter()
                    .map(|(lo, hi)| format!("[{},{})", lo, hi))
                    .collect();
                write!(
                    f,
                    "Hole in {} (width={}): bits {} not covered by any field",
                    path,
                    width,
                    gaps.join(", ")
                )
            }
        }
    }
}

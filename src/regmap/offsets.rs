use std::collections::BTreeMap;

use log::debug;

use super::error::{Finding, MalformedNumber, MAX_ARRAY_INSTANCES};
use super::model::{Block, Register};

/// One concrete register at an absolute offset. Array registers expand into
/// one instance per element named `<register><index>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub name: String,
    pub offset: u64,
}

/// Reasons a register could not be placed in its block.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutError {
    Malformed(&'static str, MalformedNumber),
    /// `base + offset + index * stride` does not fit in a `u64`.
    Overflow(String),
    /// `count` is above [`MAX_ARRAY_INSTANCES`].
    TooLarge(u64),
}

impl LayoutError {
    pub fn into_finding(self, device: &str, block: &Block, reg: &Register) -> Finding {
        match self {
            LayoutError::Malformed(attr, error) => Finding::MalformedNumber {
                path: format!("{}.{}.{}", device, block.name, reg.name),
                attr,
                error,
            },
            LayoutError::Overflow(instance) => Finding::OffsetOverflow {
                device: device.into(),
                block: block.name.clone(),
                instance,
            },
            LayoutError::TooLarge(count) => Finding::ArrayTooLarge {
                device: device.into(),
                block: block.name.clone(),
                register: reg.name.clone(),
                count,
            },
        }
    }
}

/// Computes the absolute offset of every instance of `reg` in a block
/// based at `base`.
///
/// A register with `count > 0` and a `stride` is an array. A `count` without
/// a `stride` is treated as a single register. Arrays larger than
/// [`MAX_ARRAY_INSTANCES`] are rejected before any instance is built.
pub fn expand_register(reg: &Register, base: u64) -> Result<Vec<Instance>, LayoutError> {
    let off = reg.offset().map_err(|e| LayoutError::Malformed("offset", e))?;
    let count = reg.count().map_err(|e| LayoutError::Malformed("count", e))?;
    let start = base
        .checked_add(off)
        .ok_or_else(|| LayoutError::Overflow(reg.name.clone()))?;

    match reg.stride() {
        Some(stride) if count > 0 => {
            let stride = stride.map_err(|e| LayoutError::Malformed("stride", e))?;
            if count > MAX_ARRAY_INSTANCES {
                return Err(LayoutError::TooLarge(count));
            }
            let mut instances = Vec::with_capacity(count as usize);
            for i in 0..count {
                let name = format!("{}{}", reg.name, i);
                let offset = i
                    .checked_mul(stride)
                    .and_then(|step| start.checked_add(step))
                    .ok_or_else(|| LayoutError::Overflow(name.clone()))?;
                instances.push(Instance { name, offset });
            }
            Ok(instances)
        }
        _ => Ok(vec![Instance {
            name: reg.name.clone(),
            offset: start,
        }]),
    }
}

/// Reports every register instance in `block` that lands on an absolute
/// offset already taken by an earlier instance.
///
/// The first instance at an offset is never reported; each later one is,
/// naming the first as its occupant.
pub fn check_duplicate_offsets(block: &Block, device: &str, errors: &mut Vec<Finding>) {
    let base = match block.base() {
        Ok(base) => base,
        Err(error) => {
            errors.push(Finding::MalformedNumber {
                path: format!("{}.{}", device, block.name),
                attr: "base",
                error,
            });
            return;
        }
    };

    let mut seen: BTreeMap<u64, String> = BTreeMap::new();
    for reg in block.registers() {
        let instances = match expand_register(reg, base) {
            Ok(instances) => instances,
            Err(e) => {
                errors.push(e.into_finding(device, block, reg));
                continue;
            }
        };

        for inst in instances {
            match seen.get(&inst.offset) {
                Some(occupant) => {
                    debug!("{}: {:#x} already taken by {}", block.name, inst.offset, occupant);
                    errors.push(Finding::OffsetCollision {
                        device: device.into(),
                        block: block.name.clone(),
                        offset: inst.offset,
                        instance: inst.name,
                        occupant: occupant.clone(),
                    });
                }
                None => {
                    seen.insert(inst.offset, inst.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regmap::NumLit;

    fn reg(name: &str, offset: u64) -> Register {
        Register::new(name, Some(NumLit::Int(offset)), vec![])
    }

    fn collisions(block: &Block) -> Vec<Finding> {
        let mut errors = vec![];
        check_duplicate_offsets(block, "dev", &mut errors);
        errors
    }

    #[test]
    fn test_array_expansion() {
        let r = reg("R", 0x10).with_array(2u64.into(), 4u64.into());
        assert_eq!(
            expand_register(&r, 0x100),
            Ok(vec![
                Instance {
                    name: "R0".into(),
                    offset: 0x110
                },
                Instance {
                    name: "R1".into(),
                    offset: 0x114
                },
            ])
        );
    }

    #[test]
    fn test_count_without_stride_is_single() {
        let mut r = reg("R", 8);
        r.count = Some(4u64.into());
        assert_eq!(
            expand_register(&r, 0),
            Ok(vec![Instance {
                name: "R".into(),
                offset: 8
            }])
        );
    }

    #[test]
    fn test_zero_count_is_single() {
        let r = reg("R", 8).with_array(0u64.into(), 4u64.into());
        assert_eq!(expand_register(&r, 0).map(|i| i.len()), Ok(1));
    }

    #[test]
    fn test_array_without_collision() {
        let block = Block::new(
            "BLK",
            Some(0u64.into()),
            vec![reg("R", 0x10).with_array(2u64.into(), 4u64.into())],
        );
        assert!(collisions(&block).is_empty());
    }

    #[test]
    fn test_collision_with_array_instance() {
        let block = Block::new(
            "BLK",
            Some(0u64.into()),
            vec![
                reg("R", 0x10).with_array(2u64.into(), 4u64.into()),
                reg("S", 0x14),
            ],
        );
        assert_eq!(
            collisions(&block),
            vec![Finding::OffsetCollision {
                device: "dev".into(),
                block: "BLK".into(),
                offset: 0x14,
                instance: "S".into(),
                occupant: "R1".into(),
            }]
        );
    }

    #[test]
    fn test_one_error_per_extra_instance() {
        let block = Block::new(
            "BLK",
            None,
            vec![reg("A", 0), reg("B", 0), reg("C", 0), reg("D", 4)],
        );
        let errors = collisions(&block);
        assert_eq!(errors.len(), 2);
        for (e, name) in errors.iter().zip(&["B", "C"]) {
            match e {
                Finding::OffsetCollision {
                    instance, occupant, ..
                } => {
                    assert_eq!(instance, name);
                    assert_eq!(occupant, "A");
                }
                e => panic!("Unexpected finding: {}", e),
            }
        }
    }

    #[test]
    fn test_zero_stride_array_collides_with_itself() {
        let block = Block::new(
            "BLK",
            None,
            vec![reg("R", 0).with_array(3u64.into(), 0u64.into())],
        );
        let errors = collisions(&block);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_base_applies_to_every_register() {
        let block = Block::new(
            "BLK",
            Some("0x1000".into()),
            vec![reg("A", 0), reg("B", 0x1000)],
        );
        assert!(collisions(&block).is_empty());
    }

    #[test]
    fn test_malformed_base_skips_block() {
        let block = Block::new("BLK", Some("base".into()), vec![reg("A", 0), reg("B", 0)]);
        let errors = collisions(&block);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            Finding::MalformedNumber { attr: "base", .. }
        ));
    }

    #[test]
    fn test_malformed_offset_skips_register() {
        let bad = Register::new("BAD", Some("0xG".into()), vec![]);
        let block = Block::new("BLK", None, vec![reg("A", 0), bad, reg("B", 0)]);
        let errors = collisions(&block);
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0],
            Finding::MalformedNumber { attr: "offset", .. }
        ));
        assert!(matches!(errors[1], Finding::OffsetCollision { .. }));
    }

    #[test]
    fn test_huge_array_is_rejected() {
        let r = reg("R", 0).with_array(1_000_000_000_000u64.into(), 4u64.into());
        assert_eq!(
            expand_register(&r, 0),
            Err(LayoutError::TooLarge(1_000_000_000_000))
        );

        let block = Block::new("BLK", None, vec![r, reg("A", 0x10), reg("B", 0x10)]);
        let errors = collisions(&block);
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0],
            Finding::ArrayTooLarge {
                count: 1_000_000_000_000,
                ..
            }
        ));
        assert!(matches!(errors[1], Finding::OffsetCollision { .. }));
    }

    #[test]
    fn test_largest_array_is_expanded() {
        let r = reg("R", 0).with_array(MAX_ARRAY_INSTANCES.into(), 1u64.into());
        let instances = expand_register(&r, 0).unwrap();
        assert_eq!(instances.len() as u64, MAX_ARRAY_INSTANCES);
    }

    #[test]
    fn test_overflow() {
        let r = reg("R", u64::MAX - 4).with_array(3u64.into(), 4u64.into());
        assert_eq!(
            expand_register(&r, 0),
            Err(LayoutError::Overflow("R2".into()))
        );
    }
}

/*!
Structural consistency checks for register map documents.

A document describes one device as a list of blocks. Each block holds
registers at offsets relative to the block base and each register is split
into bitfields. The checks in this module look for bitfields that claim the
same bit, register instances that land on the same absolute offset, and bit
ranges that no field covers.

Every check is a pure function of the records it is handed: findings are
appended to caller supplied lists and nothing is kept between documents.
 */
pub mod coverage;
pub mod error;
pub mod model;
pub mod number;
pub mod offsets;
pub mod overlap;
pub mod validator;

pub use coverage::{check_field_holes, find_holes};
pub use error::{AttrError, Finding, MalformedNumber, MAX_ARRAY_INSTANCES};
pub use model::{Block, Device, Field, Register, DEFAULT_REGISTER_WIDTH};
pub use number::{parse_num, parse_str, NumLit};
pub use offsets::{check_duplicate_offsets, expand_register, Instance, LayoutError};
pub use overlap::{check_field_overlaps, field_span};
pub use validator::{check_device, load_document, validate_device, validate_value, DeviceReport};

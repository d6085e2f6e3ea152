use serde::Deserialize;

use super::error::{AttrError, MalformedNumber};
use super::number::{parse_num, NumLit};

/// Width assumed for a register that does not declare one.
pub const DEFAULT_REGISTER_WIDTH: u64 = 32;

/// One device document: a named list of memory mapped blocks.
///
/// List attributes may be absent or explicitly `null` in the document; both
/// read as empty. Missing names read as empty strings, leaving required keys
/// to the schema pass so that one incomplete item does not hide findings in
/// the rest of the document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    blocks: Option<Vec<Block>>,
}

impl Device {
    pub fn new(device: Option<&str>, blocks: Vec<Block>) -> Device {
        Device {
            device: device.map(|d| d.into()),
            blocks: Some(blocks),
        }
    }

    /// The declared device name, or `fallback` (normally the file name of the
    /// document) when none is given.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.device.as_deref().unwrap_or(fallback)
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_deref().unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base: Option<NumLit>,
    #[serde(default)]
    registers: Option<Vec<Register>>,
}

impl Block {
    pub fn new(name: &str, base: Option<NumLit>, registers: Vec<Register>) -> Block {
        Block {
            name: name.into(),
            base,
            registers: Some(registers),
        }
    }

    /// Base address of the block, 0 when absent.
    pub fn base(&self) -> Result<u64, MalformedNumber> {
        self.base.as_ref().map_or(Ok(0), parse_num)
    }

    pub fn registers(&self) -> &[Register] {
        self.registers.as_deref().unwrap_or(&[])
    }
}

/// A register, or an array of `count` registers spaced `stride` bytes apart.
#[derive(Clone, Debug, Deserialize)]
pub struct Register {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub offset: Option<NumLit>,
    #[serde(default)]
    pub width: Option<NumLit>,
    #[serde(default)]
    pub count: Option<NumLit>,
    #[serde(default)]
    pub stride: Option<NumLit>,
    #[serde(default)]
    fields: Option<Vec<Field>>,
}

impl Register {
    pub fn new(name: &str, offset: Option<NumLit>, fields: Vec<Field>) -> Register {
        Register {
            name: name.into(),
            offset,
            width: None,
            count: None,
            stride: None,
            fields: Some(fields),
        }
    }

    /// Turns this register into an array of `count` instances.
    pub fn with_array(mut self, count: NumLit, stride: NumLit) -> Register {
        self.count = Some(count);
        self.stride = Some(stride);
        self
    }

    pub fn offset(&self) -> Result<u64, MalformedNumber> {
        self.offset.as_ref().map_or(Ok(0), parse_num)
    }

    pub fn width(&self) -> Result<u64, MalformedNumber> {
        self.width
            .as_ref()
            .map_or(Ok(DEFAULT_REGISTER_WIDTH), parse_num)
    }

    /// Number of array instances; 0 means the register is not an array.
    pub fn count(&self) -> Result<u64, MalformedNumber> {
        self.count.as_ref().map_or(Ok(0), parse_num)
    }

    pub fn stride(&self) -> Option<Result<u64, MalformedNumber>> {
        self.stride.as_ref().map(parse_num)
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or(&[])
    }
}

/// A bitfield occupying bits `[lsb, lsb + width)` of its register.
#[derive(Clone, Debug, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lsb: Option<NumLit>,
    #[serde(default)]
    pub width: Option<NumLit>,
}

impl Field {
    pub fn new(name: &str, lsb: u64, width: u64) -> Field {
        Field {
            name: name.into(),
            lsb: Some(NumLit::Int(lsb)),
            width: Some(NumLit::Int(width)),
        }
    }

    /// The field's `(lsb, width)` pair. On failure the name of the offending
    /// attribute is returned with the error.
    pub fn bits(&self) -> Result<(u64, u64), (&'static str, AttrError)> {
        let lsb = required_num(&self.lsb).map_err(|e| ("lsb", e))?;
        let width = required_num(&self.width).map_err(|e| ("width", e))?;
        Ok((lsb, width))
    }
}

fn required_num(v: &Option<NumLit>) -> Result<u64, AttrError> {
    match v {
        Some(v) => parse_num(v).map_err(AttrError::Malformed),
        None => Err(AttrError::Missing),
    }
}

use std::fmt::{Display, Formatter};

use serde::Deserialize;

use super::error::MalformedNumber;

/// A numeric attribute exactly as it appeared in the document.
///
/// Register maps write addresses as hex strings (`"0x1580"`) as often as
/// plain integers, and a wrongly typed value still has to make it through
/// deserialization so that it can be reported instead of rejecting the whole
/// document. [`parse_num`] turns any of these into a `u64`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumLit {
    Int(u64),
    Str(String),
    Other(serde_json::Value),
}

impl From<u64> for NumLit {
    fn from(v: u64) -> Self {
        NumLit::Int(v)
    }
}

impl From<&str> for NumLit {
    fn from(s: &str) -> Self {
        NumLit::Str(s.into())
    }
}

impl Display for NumLit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumLit::Int(v) => write!(f, "{}", v),
            NumLit::Str(s) => write!(f, "{:?}", s),
            NumLit::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Normalizes a numeric attribute into an unsigned integer.
pub fn parse_num(v: &NumLit) -> Result<u64, MalformedNumber> {
    match v {
        NumLit::Int(v) => Ok(*v),
        NumLit::Str(s) => parse_str(s),
        NumLit::Other(_) => Err(MalformedNumber::new(v.to_string())),
    }
}

/// Parses a decimal or `0x` prefixed hexadecimal literal. Surrounding
/// whitespace is ignored.
pub fn parse_str(s: &str) -> Result<u64, MalformedNumber> {
    let trimmed = s.trim();
    let parsed = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => {
            u64::from_str_radix(&trimmed[2..], 16)
        }
        _ => trimmed.parse::<u64>(),
    };
    parsed.map_err(|_| MalformedNumber::new(format!("{:?}", s)))
}

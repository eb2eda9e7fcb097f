use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the address field of an instruction is treated by the linker.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Class {
    /// Operand is a literal, never touched.
    #[strum(serialize = "I")]
    #[serde(rename = "I")]
    Immediate = b'I',
    /// Operand is already an absolute address.
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    Absolute = b'A',
    /// Operand is relative to the start of its module.
    #[strum(serialize = "R")]
    #[serde(rename = "R")]
    Relative = b'R',
    /// Operand is an index into the module's use list.
    #[strum(serialize = "E")]
    #[serde(rename = "E")]
    External = b'E',
}

impl Class {
    pub fn parse(ch: char) -> Result<Self, String> {
        u8::try_from(ch)
            .ok()
            .and_then(|b| Class::try_from(b).ok())
            .ok_or_else(|| format!("Unknown classification: `{ch}`"))
    }

    /// Relative and External operands are rewritten by the second pass.
    pub fn is_relocatable(&self) -> bool {
        matches!(self, Class::Relative | Class::External)
    }
}

use color_print::cformat;
use serde::{Deserialize, Serialize};

/// Largest address a word can carry.
pub const ADDR_MAX: u16 = 999;
/// Largest opcode digit.
pub const OPCODE_MAX: u8 = 9;
/// `opcode * WORD_SPACE + addr`
pub const WORD_SPACE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub opcode: u8,
    pub addr: u16,
}

impl Word {
    pub fn new(opcode: u8, addr: u16) -> Self {
        Word { opcode, addr }
    }

    /// Split a word token such as `1005` into opcode `1` and address `5`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        let head = chars.next().ok_or_else(|| format!("Empty word"))?;
        let tail = chars.as_str();
        if tail.is_empty() {
            return Err(format!("Word `{s}` has no address digits"));
        }
        let opcode = head
            .to_digit(10)
            .ok_or_else(|| format!("Opcode `{head}` is not a digit"))? as u8;
        if tail.len() > 3 {
            return Err(format!("Word `{s}` has more than 3 address digits"));
        }
        if !tail.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Address `{tail}` is not a number"));
        }
        let addr = tail
            .parse::<u16>()
            .map_err(|_| format!("Address `{tail}` is not a number"))?;
        Ok(Word { opcode, addr })
    }

    pub fn fits(addr: u32) -> bool {
        addr <= ADDR_MAX as u32
    }

    /// `None` if the address no longer fits the 3-digit field.
    pub fn encode(&self) -> Option<u32> {
        if self.opcode > OPCODE_MAX || !Word::fits(self.addr as u32) {
            return None;
        }
        Some(self.opcode as u32 * WORD_SPACE + self.addr as u32)
    }

    pub fn cformat(&self) -> String {
        cformat!("<red>{}</><blue>{:03}</>", self.opcode, self.addr)
    }
}

#[test]
fn parse_words() {
    assert_eq!(Word::parse("1005"), Ok(Word::new(1, 5)));
    assert_eq!(Word::parse("5010"), Ok(Word::new(5, 10)));
    assert_eq!(Word::parse("20"), Ok(Word::new(2, 0)));
    assert_eq!(Word::parse("9999"), Ok(Word::new(9, 999)));
    assert!(Word::parse("").is_err());
    assert!(Word::parse("1").is_err());
    assert!(Word::parse("x005").is_err());
    assert!(Word::parse("10a5").is_err());
    assert!(Word::parse("10000").is_err());
}

#[test]
fn encode_words() {
    assert_eq!(Word::new(2, 2).encode(), Some(2002));
    assert_eq!(Word::new(0, 0).encode(), Some(0));
    assert_eq!(Word::new(1, 1000).encode(), None);
    assert_eq!(Word::new(10, 0).encode(), None);
}

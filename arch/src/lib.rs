pub mod class;
pub mod inst;
pub mod word;

pub use class::Class;
pub use inst::Inst;
pub use word::{Word, ADDR_MAX, OPCODE_MAX, WORD_SPACE};

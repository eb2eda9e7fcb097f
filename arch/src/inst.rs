use crate::{class::Class, word::Word};

use color_print::cformat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inst {
    pub class: Class,
    pub word: Word,
}

impl Inst {
    pub fn new(class: Class, word: Word) -> Self {
        Inst { class, word }
    }

    pub fn cformat(&self) -> String {
        let class = match self.class {
            Class::Immediate => cformat!("<y>{}</>", self.class),
            Class::Absolute => cformat!("<c>{}</>", self.class),
            Class::Relative => cformat!("<g>{}</>", self.class),
            Class::External => cformat!("<m>{}</>", self.class),
        };
        format!("{}: {}", class, self.word.cformat())
    }
}

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub pos: Pos,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, pos: Pos) -> Self {
        Token { text, pos }
    }
}

/// Location of a token in the source. `row` and `col` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

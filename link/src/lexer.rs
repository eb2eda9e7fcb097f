use crate::token::{Pos, Token};
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits the source into maximal runs of word characters.
/// Everything else separates tokens and is otherwise ignored.
pub struct Lexer<'a> {
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    row: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            iter: code.char_indices().peekable(),
            row: 1,
            col: 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl<'a> Lexer<'a> {
    fn consume(&mut self) -> Option<(usize, char)> {
        let (idx, ch) = self.iter.next()?;
        if ch == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some((idx, ch))
    }
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        // 0. Skip separators
        while let Some(&(_, ch)) = self.iter.peek() {
            if is_word_char(ch) {
                break;
            }
            self.consume();
        }

        // 1. Word
        let (start, _) = *self.iter.peek()?;
        let pos = Pos {
            offset: start,
            row: self.row,
            col: self.col,
        };
        let mut end = start;
        while let Some(&(idx, ch)) = self.iter.peek() {
            if !is_word_char(ch) {
                break;
            }
            self.consume();
            end = idx + ch.len_utf8();
        }
        Some(Token::new(&self.code[start..end], pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(code: &str) -> Vec<&str> {
        Lexer::new(code).map(|tok| tok.text).collect()
    }

    #[test]
    fn empty() {
        assert!(texts("").is_empty());
        assert!(texts(" \n\t,;").is_empty());
    }

    #[test]
    fn separators() {
        assert_eq!(texts("1 xy 2\n2 z xy"), vec!["1", "xy", "2", "2", "z", "xy"]);
        assert_eq!(texts("R1004,E5000;;I_1"), vec!["R1004", "E5000", "I_1"]);
        assert_eq!(texts("a-b+c(d)"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn positions() {
        let toks: Vec<_> = Lexer::new("1 xy\n  R 1004").collect();
        assert_eq!(toks[0].pos, Pos { offset: 0, row: 1, col: 1 });
        assert_eq!(toks[1].pos, Pos { offset: 2, row: 1, col: 3 });
        assert_eq!(toks[2].pos, Pos { offset: 7, row: 2, col: 3 });
        assert_eq!(toks[3].pos, Pos { offset: 9, row: 2, col: 5 });
    }

    #[test]
    fn non_ascii_is_separator() {
        assert_eq!(texts("αx1βy2"), vec!["x1", "y2"]);
    }

    #[test]
    fn restartable() {
        let code = "1 X 2 0 1 I 5010";
        let a: Vec<_> = Lexer::new(code).collect();
        let b: Vec<_> = Lexer::new(code).collect();
        assert_eq!(a, b);
    }
}

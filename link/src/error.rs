use crate::token::Pos;
use color_print::cformat;
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Parse errors
    #[error("Malformed input `{token}` at {pos}: {reason}")]
    MalformedInput {
        token: String,
        pos: Pos,
        reason: String,
    },

    #[error("Unexpected end of input in module {module}: expected {expected}")]
    UnexpectedEof { module: usize, expected: &'static str },

    // Link errors
    #[error("Duplicate definition: `{name}` is defined in module {first} and module {second}")]
    DuplicateDefinition {
        name: String,
        first: usize,
        second: usize,
        pos: Pos,
    },

    #[error("Unresolved reference in module {module}, instruction {index}: {reason}")]
    UnresolvedReference {
        module: usize,
        index: usize,
        reason: String,
        pos: Pos,
    },

    #[error("Address out of range in module {module}: {context} resolves to {address}, outside 0-999")]
    AddressRange {
        module: usize,
        context: String,
        address: usize,
        pos: Pos,
    },

    // IO errors
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid config file {0}: {1}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Source position of the offending token, if the error has one.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::MalformedInput { pos, .. }
            | Error::DuplicateDefinition { pos, .. }
            | Error::UnresolvedReference { pos, .. }
            | Error::AddressRange { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Diagnostic text showing the file location and the offending line.
    pub fn diag(&self, file: &str, source: &str) -> String {
        diag(&cformat!("<red,bold>error</>: {}", self), file, source, self.pos())
    }

    pub fn print_diag(&self, file: &str, source: &str) {
        eprint!("{}", self.diag(file, source));
    }
}

pub(crate) fn diag(head: &str, file: &str, source: &str, pos: Option<Pos>) -> String {
    let mut out = format!("{}\n", head);
    let Some(pos) = pos else {
        let _ = writeln!(out, "{}", cformat!("     <blue>--></> <underline>{}</>", file));
        return out;
    };

    let _ = writeln!(out, "{}", cformat!("     <blue>--></> <underline>{}:{}</>", file, pos));
    let _ = writeln!(out, "{}", cformat!("      <blue>|</>"));

    let line_content = source.lines().nth(pos.row.saturating_sub(1)).unwrap_or("");

    let _ = writeln!(out, "{}", cformat!(" <blue>{:>4} |</> {}", pos.row, line_content));
    let _ = writeln!(
        out,
        "{}",
        cformat!("      <blue>|</> {}<red,bold>^</>", " ".repeat(pos.col.saturating_sub(1)))
    );
    out
}

#[cfg(test)]
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            chars.by_ref().find(|&c| c == 'm');
        } else {
            out.push(c);
        }
    }
    out
}

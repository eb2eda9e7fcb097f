pub mod check;
pub mod config;
pub mod display;
pub mod error;
pub mod lexer;
pub mod memory;
pub mod module;
pub mod parser;
pub mod relocate;
pub mod symbols;
pub mod token;

pub use check::{lint, Warning};
pub use config::{DuplicatePolicy, LinkConfig};
pub use error::Error;
pub use lexer::Lexer;
pub use memory::MemoryMap;
pub use module::{Instruction, Module, ModuleStore, Symbol};
pub use parser::Parser;
pub use relocate::relocate;
pub use symbols::SymbolTable;

use serde::Serialize;

/// A fully linked program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    /// Modules after relocation.
    #[serde(skip)]
    pub modules: ModuleStore,
    pub symbols: SymbolTable,
    pub memory: MemoryMap,
    #[serde(skip)]
    pub warnings: Vec<Warning>,
}

impl Program {
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run both passes over `code`. Either the whole program links or nothing does.
pub fn link(code: &str, config: &LinkConfig) -> Result<Program, Error> {
    let mut modules = ModuleStore::parse(code)?;
    let symbols = SymbolTable::build(&modules, config.duplicates)?;
    let warnings = if config.warnings {
        lint(&modules, &symbols)
    } else {
        Vec::new()
    };
    relocate(&mut modules, &symbols)?;
    let memory = MemoryMap::assemble(&modules)?;
    Ok(Program {
        modules,
        symbols,
        memory,
        warnings,
    })
}

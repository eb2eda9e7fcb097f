use crate::error::Error;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Pos;
use arch::{Class, Inst, Word};
use serde::Serialize;

/// A name in a definition list or a use list.
///
/// Definitions carry the location relative to their module. Uses carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub location: Option<usize>,
    #[serde(skip)]
    pub pos: Pos,
}

impl Symbol {
    pub fn definition(name: &str, location: usize, pos: Pos) -> Self {
        Symbol {
            name: name.to_string(),
            location: Some(location),
            pos,
        }
    }

    pub fn usage(name: &str, pos: Pos) -> Self {
        Symbol {
            name: name.to_string(),
            location: None,
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub inst: Inst,
    #[serde(skip)]
    pub pos: Pos,
}

impl Instruction {
    pub fn new(class: Class, word: Word, pos: Pos) -> Self {
        Instruction {
            inst: Inst::new(class, word),
            pos,
        }
    }

    pub fn class(&self) -> Class {
        self.inst.class
    }

    pub fn opcode(&self) -> u8 {
        self.inst.word.opcode
    }

    pub fn addr(&self) -> u16 {
        self.inst.word.addr
    }
}

// ----------------------------------------------------------------------------
// Module

/// One relocatable unit. Its instructions occupy `start..start + len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub start: usize,
    pub definitions: Vec<Symbol>,
    pub uses: Vec<Symbol>,
    pub instructions: Vec<Instruction>,
}

impl Module {
    pub fn new(start: usize) -> Self {
        Module {
            start,
            definitions: Vec::new(),
            uses: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub fn define(&mut self, symbol: Symbol) {
        self.definitions.push(symbol);
    }

    pub fn add_use(&mut self, symbol: Symbol) {
        self.uses.push(symbol);
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Last occupied address, `None` for a module without instructions.
    pub fn end(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.start + self.len() - 1)
        }
    }

    /// Where the following module begins.
    pub fn next_start(&self) -> usize {
        self.start + self.len()
    }
}

// ----------------------------------------------------------------------------
// Module Store

/// Modules in the order they appear in the source, laid out back to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleStore(Vec<Module>);

impl ModuleStore {
    pub fn new() -> Self {
        ModuleStore(Vec::new())
    }

    /// Parse every module of the source.
    pub fn parse(code: &str) -> Result<Self, Error> {
        let mut store = ModuleStore::new();
        for module in Parser::new(Lexer::new(code)) {
            store.push(module?);
        }
        Ok(store)
    }

    pub fn push(&mut self, module: Module) {
        debug_assert_eq!(module.start, self.next_start());
        self.0.push(module);
    }

    /// Start address of the next module pushed.
    pub fn next_start(&self) -> usize {
        self.0.last().map_or(0, Module::next_start)
    }

    /// Number of words in the whole program.
    pub fn words(&self) -> usize {
        self.0.iter().map(Module::len).sum()
    }

    pub fn get(&self, idx: usize) -> Option<&Module> {
        self.0.get(idx)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Module> {
        self.0.iter_mut()
    }
}

impl<'a> IntoIterator for &'a ModuleStore {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inst(addr: u16) -> Instruction {
        Instruction::new(Class::Immediate, Word::new(1, addr), Pos::default())
    }

    #[test]
    fn end_follows_length() {
        let mut module = Module::new(3);
        assert_eq!(module.end(), None);
        assert_eq!(module.next_start(), 3);
        module.push(inst(0));
        assert_eq!(module.end(), Some(3));
        module.push(inst(1));
        assert_eq!(module.len(), 2);
        assert_eq!(module.end(), Some(4));
        assert_eq!(module.next_start(), 5);
    }

    #[test]
    fn empty_module_at_zero() {
        let module = Module::new(0);
        assert_eq!(module.end(), None);
        assert_eq!(module.next_start(), 0);
    }

    #[test]
    fn store_layout() {
        let mut store = ModuleStore::new();
        assert_eq!(store.next_start(), 0);

        let mut m0 = Module::new(0);
        m0.push(inst(0));
        m0.push(inst(1));
        store.push(m0);
        assert_eq!(store.next_start(), 2);

        store.push(Module::new(2));
        assert_eq!(store.next_start(), 2);

        let mut m2 = Module::new(2);
        m2.push(inst(0));
        store.push(m2);
        assert_eq!(store.words(), 3);
        assert_eq!(store.len(), 3);
    }
}

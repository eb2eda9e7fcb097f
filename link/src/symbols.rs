use crate::config::DuplicatePolicy;
use crate::error::Error;
use crate::module::ModuleStore;
use crate::token::Pos;
use arch::Word;
use indexmap::IndexMap;
use serde::Serialize;

/// Absolute address of a defined name and where it was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub addr: u16,
    pub module: usize,
    #[serde(skip)]
    pub pos: Pos,
}

/// Program-wide name to address map, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, Entry>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// First pass: turn every module-relative definition into an absolute address.
    pub fn build(store: &ModuleStore, policy: DuplicatePolicy) -> Result<Self, Error> {
        let mut table = SymbolTable::new();
        for (idx, module) in store.iter().enumerate() {
            for def in &module.definitions {
                let address = def.location.unwrap_or(0).saturating_add(module.start);
                if !Word::fits(address as u32) {
                    return Err(Error::AddressRange {
                        module: idx,
                        context: format!("symbol `{}`", def.name),
                        address,
                        pos: def.pos,
                    });
                }
                let entry = Entry {
                    addr: address as u16,
                    module: idx,
                    pos: def.pos,
                };
                table.insert(def.name.clone(), entry, policy)?;
            }
        }
        Ok(table)
    }

    /// Returns the entry that lost, if the name was already defined.
    pub fn insert(
        &mut self,
        name: String,
        entry: Entry,
        policy: DuplicatePolicy,
    ) -> Result<Option<Entry>, Error> {
        let Some(prev) = self.0.get(&name).copied() else {
            self.0.insert(name, entry);
            return Ok(None);
        };
        match policy {
            DuplicatePolicy::Error => Err(Error::DuplicateDefinition {
                name,
                first: prev.module,
                second: entry.module,
                pos: entry.pos,
            }),
            DuplicatePolicy::First => Ok(Some(entry)),
            DuplicatePolicy::Last => {
                self.0.insert(name, entry);
                Ok(Some(prev))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.0.get(name)
    }

    pub fn get_addr(&self, name: &str) -> Option<u16> {
        self.0.get(name).map(|entry| entry.addr)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(addr: u16, module: usize) -> Entry {
        Entry {
            addr,
            module,
            pos: Pos::default(),
        }
    }

    #[test]
    fn absolute_addresses() {
        let store = ModuleStore::parse("1 X 2 0 3 I 1000 I 1000 I 1000  2 Y 0 Z 1 0 1 I 1000").unwrap();
        let table = SymbolTable::build(&store, DuplicatePolicy::Error).unwrap();
        assert_eq!(table.get_addr("X"), Some(2));
        assert_eq!(table.get_addr("Y"), Some(3));
        assert_eq!(table.get_addr("Z"), Some(4));
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn duplicate_error() {
        let mut table = SymbolTable::new();
        table.insert("X".into(), entry(1, 0), DuplicatePolicy::Error).unwrap();
        let err = table.insert("X".into(), entry(7, 2), DuplicatePolicy::Error);
        assert!(matches!(
            err,
            Err(Error::DuplicateDefinition { first: 0, second: 2, .. })
        ));
    }

    #[test]
    fn duplicate_first_wins() {
        let mut table = SymbolTable::new();
        table.insert("X".into(), entry(1, 0), DuplicatePolicy::First).unwrap();
        let lost = table.insert("X".into(), entry(7, 2), DuplicatePolicy::First).unwrap();
        assert_eq!(lost, Some(entry(7, 2)));
        assert_eq!(table.get_addr("X"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn duplicate_last_wins() {
        let mut table = SymbolTable::new();
        table.insert("X".into(), entry(1, 0), DuplicatePolicy::Last).unwrap();
        let lost = table.insert("X".into(), entry(7, 2), DuplicatePolicy::Last).unwrap();
        assert_eq!(lost, Some(entry(1, 0)));
        assert_eq!(table.get_addr("X"), Some(7));
    }

    #[test]
    fn symbol_out_of_range() {
        let store = ModuleStore::parse("1 X 1000 0 0").unwrap();
        assert!(matches!(
            SymbolTable::build(&store, DuplicatePolicy::Error),
            Err(Error::AddressRange { address: 1000, .. })
        ));
    }
}

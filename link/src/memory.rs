use crate::error::Error;
use crate::module::ModuleStore;
use serde::Serialize;

/// Final image: one encoded word per instruction, indexed by absolute address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MemoryMap(Vec<u32>);

impl MemoryMap {
    /// Concatenate the words of every module in program order.
    pub fn assemble(store: &ModuleStore) -> Result<Self, Error> {
        let mut words = Vec::with_capacity(store.words());
        for (idx, module) in store.iter().enumerate() {
            for (i, inst) in module.instructions.iter().enumerate() {
                let word = inst.inst.word;
                let bin = word.encode().ok_or_else(|| Error::AddressRange {
                    module: idx,
                    context: format!("instruction {i}"),
                    address: word.addr as usize,
                    pos: inst.pos,
                })?;
                words.push(bin);
            }
        }
        Ok(MemoryMap(words))
    }

    pub fn get(&self, addr: usize) -> Option<u32> {
        self.0.get(addr).copied()
    }

    pub fn words(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(address, word)` pairs starting at address 0.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_in_program_order() {
        let store = ModuleStore::parse("0 0 2 I 5010 A 3999  0 0 0  0 0 1 I 10").unwrap();
        let map = MemoryMap::assemble(&store).unwrap();
        assert_eq!(map.words(), &[5010, 3999, 1000]);
        assert_eq!(map.len(), store.words());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(0, 5010), (1, 3999), (2, 1000)]);
    }

    #[test]
    fn empty_program() {
        let map = MemoryMap::assemble(&ModuleStore::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.get(0), None);
    }
}

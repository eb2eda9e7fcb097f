use crate::memory::MemoryMap;
use crate::module::ModuleStore;
use crate::symbols::SymbolTable;
use color_print::cformat;
use std::fmt::Write;

pub fn memory_map(map: &MemoryMap) -> String {
    let mut out = String::from("Memory Map\n");
    for (addr, word) in map.iter() {
        let _ = writeln!(out, "{}:\t{:04}", addr, word);
    }
    out
}

pub fn symbol_table(table: &SymbolTable) -> String {
    let mut out = String::from("Symbol Table\n");
    for (name, entry) in table.iter() {
        let _ = writeln!(out, "{}={}", name, entry.addr);
    }
    out
}

/// Layout of every module as parsed, before relocation.
pub fn modules(store: &ModuleStore) -> String {
    let mut out = String::new();
    for (idx, module) in store.iter().enumerate() {
        let end = module
            .end()
            .map_or_else(|| "-".to_string(), |end| format!("{:03}", end));
        let _ = writeln!(out, "+-[Module {}]-+---------------------------------------------", idx);
        let _ = writeln!(
            out,
            "{}",
            cformat!(
                "| start <c>{:03}</>  end <c>{}</>  length <c>{}</>",
                module.start,
                end,
                module.len()
            )
        );
        for def in &module.definitions {
            let _ = writeln!(
                out,
                "{}",
                cformat!("| def  <g>{}</>={}", def.name, def.location.unwrap_or(0))
            );
        }
        for (i, usage) in module.uses.iter().enumerate() {
            let _ = writeln!(out, "{}", cformat!("| use  [{}] <m>{}</>", i, usage.name));
        }
        for (i, inst) in module.instructions.iter().enumerate() {
            let _ = writeln!(out, "| {:03} : {}", module.start + i, inst.inst.cformat());
        }
    }
    let _ = writeln!(out, "+------------+---------------------------------------------");
    out
}

pub fn print_modules(store: &ModuleStore) {
    eprint!("{}", modules(store));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;

    #[test]
    fn text_output() {
        let store = ModuleStore::parse("1 X 2 0 1 I 5010  0 0 1 I 0010").unwrap();
        let table = SymbolTable::build(&store, DuplicatePolicy::Error).unwrap();
        let map = MemoryMap::assemble(&store).unwrap();
        assert_eq!(memory_map(&map), "Memory Map\n0:\t5010\n1:\t0010\n");
        assert_eq!(symbol_table(&table), "Symbol Table\nX=2\n");
    }

    #[test]
    fn module_dump() {
        let store = ModuleStore::parse("1 X 1 0 2 I 5010 R 2001  0 0 0  0 1 X 1 E 1000").unwrap();
        let dump = crate::error::strip_ansi(&modules(&store));
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "+-[Module 0]-+---------------------------------------------",
                "| start 000  end 001  length 2",
                "| def  X=1",
                "| 000 : I: 5010",
                "| 001 : R: 2001",
                "+-[Module 1]-+---------------------------------------------",
                "| start 002  end -  length 0",
                "+-[Module 2]-+---------------------------------------------",
                "| start 002  end 002  length 1",
                "| use  [0] X",
                "| 002 : E: 1000",
                "+------------+---------------------------------------------",
            ]
        );
    }
}

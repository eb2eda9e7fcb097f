use crate::error::diag;
use crate::module::ModuleStore;
use crate::symbols::SymbolTable;
use crate::token::Pos;
use arch::Class;
use color_print::cformat;
use std::collections::HashSet;
use std::fmt;

/// Suspicious but linkable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    DefinitionOutsideModule {
        name: String,
        module: usize,
        location: usize,
        len: usize,
        pos: Pos,
    },
    DefinedButUnused {
        name: String,
        module: usize,
        pos: Pos,
    },
    UseNotReferenced {
        name: String,
        module: usize,
        pos: Pos,
    },
    DuplicateIgnored {
        name: String,
        module: usize,
        kept: usize,
        pos: Pos,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DefinitionOutsideModule {
                name,
                module,
                location,
                len,
                ..
            } => write!(
                f,
                "`{name}` is defined at {location} but module {module} has only {len} words"
            ),
            Warning::DefinedButUnused { name, module, .. } => {
                write!(f, "`{name}` is defined in module {module} but never used")
            }
            Warning::UseNotReferenced { name, module, .. } => write!(
                f,
                "`{name}` is in the use list of module {module} but no instruction refers to it"
            ),
            Warning::DuplicateIgnored {
                name, module, kept, ..
            } => write!(
                f,
                "`{name}` in module {module} is ignored, the definition in module {kept} is used"
            ),
        }
    }
}

impl Warning {
    pub fn pos(&self) -> Pos {
        match self {
            Warning::DefinitionOutsideModule { pos, .. }
            | Warning::DefinedButUnused { pos, .. }
            | Warning::UseNotReferenced { pos, .. }
            | Warning::DuplicateIgnored { pos, .. } => *pos,
        }
    }

    pub fn diag(&self, file: &str, source: &str) -> String {
        diag(&cformat!("<yellow,bold>warn</>: {}", self), file, source, Some(self.pos()))
    }

    pub fn print_diag(&self, file: &str, source: &str) {
        eprint!("{}", self.diag(file, source));
    }
}

/// Collect warnings for a parsed program.
///
/// Must run before relocation: External operands are still use-list indices here.
pub fn lint(store: &ModuleStore, table: &SymbolTable) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let used: HashSet<&str> = store
        .iter()
        .flat_map(|module| module.uses.iter().map(|usage| usage.name.as_str()))
        .collect();

    for (idx, module) in store.iter().enumerate() {
        for def in &module.definitions {
            let location = def.location.unwrap_or(0);
            if location >= module.len() {
                warnings.push(Warning::DefinitionOutsideModule {
                    name: def.name.clone(),
                    module: idx,
                    location,
                    len: module.len(),
                    pos: def.pos,
                });
            }

            match table.get(&def.name) {
                Some(entry) if entry.pos != def.pos => {
                    warnings.push(Warning::DuplicateIgnored {
                        name: def.name.clone(),
                        module: idx,
                        kept: entry.module,
                        pos: def.pos,
                    });
                    continue;
                }
                _ => {}
            }

            if !used.contains(def.name.as_str()) {
                warnings.push(Warning::DefinedButUnused {
                    name: def.name.clone(),
                    module: idx,
                    pos: def.pos,
                });
            }
        }

        let referenced: HashSet<usize> = module
            .instructions
            .iter()
            .filter(|inst| inst.class() == Class::External)
            .map(|inst| inst.addr() as usize)
            .collect();
        for (i, usage) in module.uses.iter().enumerate() {
            if !referenced.contains(&i) {
                warnings.push(Warning::UseNotReferenced {
                    name: usage.name.clone(),
                    module: idx,
                    pos: usage.pos,
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;

    fn warnings(code: &str, policy: DuplicatePolicy) -> Vec<Warning> {
        let store = ModuleStore::parse(code).unwrap();
        let table = SymbolTable::build(&store, policy).unwrap();
        lint(&store, &table)
    }

    #[test]
    fn clean_program() {
        assert!(warnings("1 X 0 0 1 I 1000  0 1 X 1 E 2000", DuplicatePolicy::Error).is_empty());
    }

    #[test]
    fn definition_outside_module() {
        let ws = warnings("1 X 5 1 X 1 E 1000", DuplicatePolicy::Error);
        assert_eq!(ws.len(), 1);
        assert!(matches!(
            &ws[0],
            Warning::DefinitionOutsideModule { location: 5, len: 1, .. }
        ));
    }

    #[test]
    fn unused_definition_and_use() {
        let ws = warnings("1 X 0 1 Y 1 I 1000  1 Y 0 0 1 I 1000", DuplicatePolicy::Error);
        assert_eq!(ws.len(), 2);
        assert!(matches!(&ws[0], Warning::DefinedButUnused { name, .. } if name == "X"));
        assert!(matches!(&ws[1], Warning::UseNotReferenced { name, module: 0, .. } if name == "Y"));
    }

    #[test]
    fn warning_diag() {
        let source = "1 X 0 1 Y 1 I 1000  1 Y 0 0 1 I 1000";
        let ws = warnings(source, DuplicatePolicy::Error);
        let text = crate::error::strip_ansi(&ws[0].diag("input.txt", source));
        assert!(text.starts_with("warn: `X` is defined in module 0 but never used\n"));
        assert!(text.contains("--> input.txt:1:3\n"));
        assert!(text.ends_with("      |   ^\n"));
    }

    #[test]
    fn duplicate_under_first_policy() {
        let ws = warnings("1 X 0 1 X 1 E 1000  1 X 0 0 1 I 1000", DuplicatePolicy::First);
        assert_eq!(
            ws,
            vec![Warning::DuplicateIgnored {
                name: "X".to_string(),
                module: 1,
                kept: 0,
                pos: Pos { offset: 22, row: 1, col: 23 },
            }]
        );
    }
}

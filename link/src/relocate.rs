use crate::error::Error;
use crate::module::{Module, ModuleStore};
use crate::symbols::SymbolTable;
use arch::{Class, Word};

/// Second pass: rewrite every Relative and External address in place.
///
/// The table must already hold every definition of the program, since an
/// External operand may name a symbol from a later module.
pub fn relocate(store: &mut ModuleStore, table: &SymbolTable) -> Result<(), Error> {
    for (idx, module) in store.iter_mut().enumerate() {
        relocate_module(idx, module, table)?;
    }
    Ok(())
}

fn relocate_module(idx: usize, module: &mut Module, table: &SymbolTable) -> Result<(), Error> {
    let start = module.start;
    let uses = &module.uses;

    for (i, inst) in module.instructions.iter_mut().enumerate() {
        let addr = inst.inst.word.addr as usize;
        let class = inst.inst.class;
        if !class.is_relocatable() {
            continue;
        }
        let resolved = if class == Class::Relative {
            addr + start
        } else {
            let usage = uses.get(addr).ok_or_else(|| Error::UnresolvedReference {
                module: idx,
                index: i,
                reason: format!(
                    "use index {} is out of range, the module has {} uses",
                    addr,
                    uses.len()
                ),
                pos: inst.pos,
            })?;
            let entry = table.get(&usage.name).ok_or_else(|| Error::UnresolvedReference {
                module: idx,
                index: i,
                reason: format!("symbol `{}` is not defined", usage.name),
                pos: inst.pos,
            })?;
            entry.addr as usize
        };

        if !Word::fits(resolved as u32) {
            return Err(Error::AddressRange {
                module: idx,
                context: format!("instruction {i}"),
                address: resolved,
                pos: inst.pos,
            });
        }
        inst.inst.word.addr = resolved as u16;
    }
    Ok(())
}

//! `name` custom section expansion

use wasmparser::{Name, NameSectionReader};

use super::{ModuleReader, ReadResult};
use crate::event::Event;
use crate::types::Index;
use crate::visitor::Visitor;

// Subsection ids of the name section
const MODULE_NAMES: u32 = 0;
const FUNCTION_NAMES: u32 = 1;
const LOCAL_NAMES: u32 = 2;

/// Encoded length of `value` as unsigned LEB128
fn leb128_len(mut value: usize) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

impl<V: Visitor + ?Sized> ModuleReader<'_, V> {
    pub(super) fn names_section(&mut self, reader: NameSectionReader<'_>) -> ReadResult<V> {
        for (index, name) in (0..).zip(reader) {
            match name? {
                Name::Module { name, .. } => {
                    self.emit(Event::ModuleNameSubsection {
                        index,
                        name_type: MODULE_NAMES,
                        size: leb128_len(name.len()) + name.len(),
                    })?;
                    self.emit(Event::ModuleName { name })?;
                }
                Name::Function(map) => {
                    self.emit(Event::FunctionNameSubsection {
                        index,
                        name_type: FUNCTION_NAMES,
                        size: map.range().len(),
                    })?;
                    self.emit(Event::FunctionNamesCount { count: map.count() })?;
                    for naming in map {
                        let naming = naming?;
                        self.emit(Event::FunctionName {
                            index: naming.index,
                            name: naming.name,
                        })?;
                    }
                }
                Name::Local(map) => {
                    self.emit(Event::LocalNameSubsection {
                        index,
                        name_type: LOCAL_NAMES,
                        size: map.range().len(),
                    })?;
                    self.emit(Event::LocalNameFunctionCount { count: map.count() })?;
                    for func in map {
                        let func = func?;
                        let func_index: Index = func.index;
                        self.emit(Event::LocalNameLocalCount {
                            index: func_index,
                            count: func.names.count(),
                        })?;
                        for local in func.names {
                            let local = local?;
                            self.emit(Event::LocalName {
                                func_index,
                                local_index: local.index,
                                name: local.name,
                            })?;
                        }
                    }
                }
                _ => tracing::debug!(subsection = index, "skipping name subsection"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leb128_len() {
        assert_eq!(leb128_len(0), 1);
        assert_eq!(leb128_len(0x7f), 1);
        assert_eq!(leb128_len(0x80), 2);
        assert_eq!(leb128_len(0x3fff), 2);
        assert_eq!(leb128_len(0x4000), 3);
    }
}

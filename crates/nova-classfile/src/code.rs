use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

/// A decoded `Code` attribute (JVMS 4.7.3).
///
/// Bytecode and the exception table are skipped; only the frame sizes and the
/// `LocalVariableTable` debug attribute are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code_length: u32,
    local_variable_table: Option<Vec<LocalVariable>>,
}

/// One `LocalVariableTable` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    pub start_pc: u16,
    pub length: u16,
    pub name: String,
    pub descriptor: String,
    pub slot: u16,
}

impl LocalVariable {
    /// Whether the variable is live from the first instruction, as method
    /// parameters (and the receiver) are.
    pub fn starts_at_entry(&self) -> bool {
        self.start_pc == 0
    }
}

impl CodeAttribute {
    pub(crate) fn parse(info: &[u8], cp: &ConstantPool) -> Result<Self> {
        let mut reader = Reader::new(info);
        let max_stack = reader.read_u2()?;
        let max_locals = reader.read_u2()?;
        let code_length = reader.read_u4()?;
        reader.skip(code_length as usize)?;

        let exception_table_length = reader.read_u2()? as usize;
        // start_pc, end_pc, handler_pc, catch_type
        reader.skip(exception_table_length * 8)?;

        let mut local_variable_table: Option<Vec<LocalVariable>> = None;
        let attributes_count = reader.read_u2()?;
        for _ in 0..attributes_count {
            let name_index = reader.read_u2()?;
            let length = reader.read_u4()? as usize;
            let payload = reader.read_bytes(length)?;
            if cp.get_utf8(name_index)? != "LocalVariableTable" {
                continue;
            }

            // javac emits one table, but the format allows several; merge them.
            let mut sub = Reader::new(payload);
            let table = local_variable_table.get_or_insert_with(Vec::new);
            let count = sub.read_u2()? as usize;
            table.reserve(count);
            for _ in 0..count {
                table.push(parse_local_variable(&mut sub, cp)?);
            }
            sub.ensure_empty()
                .map_err(|_| Error::MalformedAttribute("LocalVariableTable"))?;
        }

        reader
            .ensure_empty()
            .map_err(|_| Error::MalformedAttribute("Code"))?;

        Ok(Self {
            max_stack,
            max_locals,
            code_length,
            local_variable_table,
        })
    }

    pub fn has_local_variable_table(&self) -> bool {
        self.local_variable_table.is_some()
    }

    /// Entries of every `LocalVariableTable` attribute, in file order.
    pub fn local_variables(&self) -> &[LocalVariable] {
        self.local_variable_table.as_deref().unwrap_or(&[])
    }
}

fn parse_local_variable(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<LocalVariable> {
    let start_pc = reader.read_u2()?;
    let length = reader.read_u2()?;
    let name = cp.get_utf8(reader.read_u2()?)?.to_string();
    let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();
    let slot = reader.read_u2()?;
    Ok(LocalVariable {
        start_pc,
        length,
        name,
        descriptor,
        slot,
    })
}

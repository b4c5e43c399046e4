//! A tiny class-file writer for tests.
//!
//! It emits just enough structure for [`crate::ClassFile::parse`]: a
//! constant pool of `Utf8`/`Class` entries, fields without attributes, and
//! methods whose `Code` holds a trivial body plus an optional
//! `LocalVariableTable`. Not a general-purpose assembler.

use std::collections::HashMap;

const MAJOR_JAVA_8: u16 = 52;
const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;
const OP_NOP: u8 = 0x00;
const OP_RETURN: u8 = 0xB1;

#[derive(Debug, Clone)]
struct Local {
    start_pc: u16,
    length: Option<u16>,
    slot: u16,
    name: String,
    descriptor: String,
}

#[derive(Debug, Clone)]
pub struct MethodSpec {
    access_flags: u16,
    name: String,
    descriptor: String,
    has_code: bool,
    duplicate_code: bool,
    corrupt_local_names: bool,
    local_tables: Vec<Vec<Local>>,
}

impl MethodSpec {
    pub fn new(name: &str, descriptor: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            has_code: true,
            duplicate_code: false,
            corrupt_local_names: false,
            local_tables: Vec::new(),
        }
    }

    /// Adds access flags on top of `ACC_PUBLIC`.
    pub fn access(mut self, flags: u16) -> Self {
        self.access_flags |= flags;
        self
    }

    pub fn no_code(mut self) -> Self {
        self.has_code = false;
        self
    }

    pub fn duplicate_code(mut self) -> Self {
        self.duplicate_code = true;
        self
    }

    /// Writes an out-of-range constant pool index as the name of every local.
    ///
    /// The class still parses; decoding this method's `Code` fails.
    pub fn corrupt_local_names(mut self) -> Self {
        self.corrupt_local_names = true;
        self
    }

    /// Appends a `LocalVariableTable` whose entries all cover the whole body.
    ///
    /// Each call adds a separate table attribute; an empty slice still emits
    /// an (empty) table.
    pub fn locals(mut self, entries: &[(u16, &str, &str)]) -> Self {
        self.local_tables.push(
            entries
                .iter()
                .map(|&(slot, name, descriptor)| Local {
                    start_pc: 0,
                    length: None,
                    slot,
                    name: name.to_string(),
                    descriptor: descriptor.to_string(),
                })
                .collect(),
        );
        self
    }

    /// Adds an entry with an explicit scope to the last table (creating one
    /// if needed).
    pub fn scoped_local(
        mut self,
        start_pc: u16,
        length: u16,
        slot: u16,
        name: &str,
        descriptor: &str,
    ) -> Self {
        if self.local_tables.is_empty() {
            self.local_tables.push(Vec::new());
        }
        if let Some(table) = self.local_tables.last_mut() {
            table.push(Local {
                start_pc,
                length: Some(length),
                slot,
                name: name.to_string(),
                descriptor: descriptor.to_string(),
            });
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ClassBuilder {
    this_class: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<(String, String)>,
    methods: Vec<MethodSpec>,
}

impl ClassBuilder {
    pub fn new(internal_name: &str) -> Self {
        Self {
            this_class: internal_name.to_string(),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn field(mut self, name: &str, descriptor: &str) -> Self {
        self.fields.push((name.to_string(), descriptor.to_string()));
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();
        let this_class = pool.class(&self.this_class);
        let super_class = self.super_class.as_deref().map(|name| pool.class(name));
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();

        let mut body = Vec::new();
        push_u16(&mut body, ACC_PUBLIC | ACC_SUPER);
        push_u16(&mut body, this_class);
        push_u16(&mut body, super_class.unwrap_or(0));
        push_u16(&mut body, interfaces.len() as u16);
        for index in interfaces {
            push_u16(&mut body, index);
        }

        push_u16(&mut body, self.fields.len() as u16);
        for (name, descriptor) in &self.fields {
            push_u16(&mut body, ACC_PUBLIC);
            push_u16(&mut body, pool.utf8(name));
            push_u16(&mut body, pool.utf8(descriptor));
            push_u16(&mut body, 0);
        }

        push_u16(&mut body, self.methods.len() as u16);
        for method in &self.methods {
            write_method(&mut body, &mut pool, method);
        }

        // No class attributes.
        push_u16(&mut body, 0);

        let mut out = Vec::new();
        push_u32(&mut out, 0xCAFEBABE);
        push_u16(&mut out, 0);
        push_u16(&mut out, MAJOR_JAVA_8);
        pool.write(&mut out);
        out.extend_from_slice(&body);
        out
    }
}

fn write_method(out: &mut Vec<u8>, pool: &mut PoolWriter, method: &MethodSpec) {
    push_u16(out, method.access_flags);
    push_u16(out, pool.utf8(&method.name));
    push_u16(out, pool.utf8(&method.descriptor));

    if !method.has_code {
        push_u16(out, 0);
        return;
    }

    let code = code_attribute(pool, method);
    let code_name = pool.utf8("Code");
    let copies = if method.duplicate_code { 2 } else { 1 };
    push_u16(out, copies);
    for _ in 0..copies {
        push_u16(out, code_name);
        push_u32(out, code.len() as u32);
        out.extend_from_slice(&code);
    }
}

fn code_attribute(pool: &mut PoolWriter, method: &MethodSpec) -> Vec<u8> {
    let scope_end = method
        .local_tables
        .iter()
        .flatten()
        .filter_map(|local| local.length.map(|len| local.start_pc + len))
        .max()
        .unwrap_or(0);
    let mut bytecode = vec![OP_NOP; scope_end as usize];
    bytecode.push(OP_RETURN);
    let code_length = bytecode.len() as u16;

    let max_locals = method
        .local_tables
        .iter()
        .flatten()
        .map(|local| local.slot + 2)
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    push_u16(&mut out, 1); // max_stack
    push_u16(&mut out, max_locals);
    push_u32(&mut out, bytecode.len() as u32);
    out.extend_from_slice(&bytecode);
    push_u16(&mut out, 0); // exception_table_length

    push_u16(&mut out, method.local_tables.len() as u16);
    for table in &method.local_tables {
        let name = pool.utf8("LocalVariableTable");
        push_u16(&mut out, name);
        push_u32(&mut out, 2 + 10 * table.len() as u32);
        push_u16(&mut out, table.len() as u16);
        for local in table {
            push_u16(&mut out, local.start_pc);
            push_u16(&mut out, local.length.unwrap_or(code_length));
            let name_index = if method.corrupt_local_names {
                u16::MAX
            } else {
                pool.utf8(&local.name)
            };
            push_u16(&mut out, name_index);
            push_u16(&mut out, pool.utf8(&local.descriptor));
            push_u16(&mut out, local.slot);
        }
    }
    out
}

#[derive(Default)]
struct PoolWriter {
    bytes: Vec<u8>,
    count: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl PoolWriter {
    fn next_index(&mut self) -> u16 {
        self.count += 1;
        self.count
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(&index) = self.utf8.get(value) {
            return index;
        }
        let index = self.next_index();
        self.bytes.push(1); // CONSTANT_Utf8
        push_u16(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(&index) = self.classes.get(internal_name) {
            return index;
        }
        let name_index = self.utf8(internal_name);
        let index = self.next_index();
        self.bytes.push(7); // CONSTANT_Class
        push_u16(&mut self.bytes, name_index);
        self.classes.insert(internal_name.to_string(), index);
        index
    }

    fn write(&self, out: &mut Vec<u8>) {
        push_u16(out, self.count + 1);
        out.extend_from_slice(&self.bytes);
    }
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

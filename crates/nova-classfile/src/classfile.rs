use std::ops::Range;

use crate::code::CodeAttribute;
use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_ABSTRACT: u16 = 0x0400;

const MAGIC: u32 = 0xCAFEBABE;

/// A parsed class file, reduced to what is needed to inspect method bodies.
///
/// Fields and class-level attributes are validated structurally and skipped.
/// `Code` attributes are located but not decoded until [`ClassFile::code`] is
/// called, so parsing a large class stays proportional to its member table.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: Vec<ClassMember>,
    constant_pool: ConstantPool,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// Byte range of the `Code` attribute payload within the class file.
    code: Option<Range<usize>>,
}

impl ClassMember {
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_owned(bytes.to_vec())
    }

    pub fn parse_owned(bytes: Vec<u8>) -> Result<Self> {
        let mut reader = Reader::new(&bytes);
        let magic = reader.read_u4()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let minor_version = reader.read_u2()?;
        let major_version = reader.read_u2()?;
        let cp = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = cp.get_class_name(reader.read_u2()?)?;
        let super_class = match reader.read_u2()? {
            0 => None,
            idx => Some(cp.get_class_name(idx)?),
        };

        let interfaces_count = reader.read_u2()? as usize;
        let mut interfaces = Vec::with_capacity(interfaces_count);
        for _ in 0..interfaces_count {
            interfaces.push(cp.get_class_name(reader.read_u2()?)?);
        }

        let fields_count = reader.read_u2()?;
        for _ in 0..fields_count {
            reader.skip(6)?; // access_flags, name_index, descriptor_index
            skip_attributes(&mut reader)?;
        }

        let methods_count = reader.read_u2()? as usize;
        let mut methods = Vec::with_capacity(methods_count);
        for _ in 0..methods_count {
            methods.push(parse_method(&mut reader, &cp)?);
        }

        skip_attributes(&mut reader)?;
        reader.ensure_empty()?;

        Ok(Self {
            minor_version,
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            methods,
            constant_pool: cp,
            bytes,
        })
    }

    /// Decode the `Code` attribute of `member`.
    ///
    /// Returns `Ok(None)` for members without a body (abstract or native).
    /// `member` must come from this class file's `methods`.
    pub fn code(&self, member: &ClassMember) -> Result<Option<CodeAttribute>> {
        let Some(range) = member.code.clone() else {
            return Ok(None);
        };
        let info = self
            .bytes
            .get(range)
            .ok_or(Error::MalformedAttribute("Code"))?;
        CodeAttribute::parse(info, &self.constant_pool).map(Some)
    }
}

fn parse_method(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<ClassMember> {
    let access_flags = reader.read_u2()?;
    let name = cp.get_utf8(reader.read_u2()?)?.to_string();
    let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();

    let mut code = None;
    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        let name_index = reader.read_u2()?;
        let length = reader.read_u4()? as usize;
        let start = reader.position();
        reader.skip(length)?;
        if cp.get_utf8(name_index)? == "Code" {
            if code.is_some() {
                return Err(Error::MalformedAttribute("Code"));
            }
            code = Some(start..start + length);
        }
    }

    Ok(ClassMember {
        access_flags,
        name,
        descriptor,
        code,
    })
}

fn skip_attributes(reader: &mut Reader<'_>) -> Result<()> {
    let attributes_count = reader.read_u2()?;
    for _ in 0..attributes_count {
        reader.read_u2()?; // attribute_name_index
        let length = reader.read_u4()? as usize;
        reader.skip(length)?;
    }
    Ok(())
}

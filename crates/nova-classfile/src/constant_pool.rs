use crate::error::{Error, Result};
use crate::reader::Reader;

const CONSTANT_UTF8: u8 = 1;
const CONSTANT_INTEGER: u8 = 3;
const CONSTANT_FLOAT: u8 = 4;
const CONSTANT_LONG: u8 = 5;
const CONSTANT_DOUBLE: u8 = 6;
const CONSTANT_CLASS: u8 = 7;
const CONSTANT_STRING: u8 = 8;
const CONSTANT_FIELDREF: u8 = 9;
const CONSTANT_METHODREF: u8 = 10;
const CONSTANT_INTERFACE_METHODREF: u8 = 11;
const CONSTANT_NAME_AND_TYPE: u8 = 12;
const CONSTANT_METHOD_HANDLE: u8 = 15;
const CONSTANT_METHOD_TYPE: u8 = 16;
const CONSTANT_DYNAMIC: u8 = 17;
const CONSTANT_INVOKE_DYNAMIC: u8 = 18;
const CONSTANT_MODULE: u8 = 19;
const CONSTANT_PACKAGE: u8 = 20;

/// A constant pool entry.
///
/// Only the payloads needed to resolve member names, descriptors and class
/// names are kept; everything else is recorded by kind so type mismatches can
/// still be reported precisely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CpInfo {
    Utf8(String),
    Class { name_index: u16 },
    Other(&'static str),
    /// Index 0, and the second index taken by `Long`/`Double` entries.
    Unusable,
}

impl CpInfo {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::Class { .. } => "Class",
            CpInfo::Other(kind) => kind,
            CpInfo::Unusable => "Unusable",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ConstantPool {
    entries: Vec<CpInfo>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(CpInfo::Unusable);

        while entries.len() < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                CONSTANT_UTF8 => {
                    let len = reader.read_u2()? as usize;
                    CpInfo::Utf8(decode_modified_utf8(reader.read_bytes(len)?)?)
                }
                CONSTANT_CLASS => CpInfo::Class {
                    name_index: reader.read_u2()?,
                },
                CONSTANT_INTEGER | CONSTANT_FLOAT => {
                    reader.skip(4)?;
                    CpInfo::Other(if tag == CONSTANT_INTEGER { "Integer" } else { "Float" })
                }
                CONSTANT_LONG | CONSTANT_DOUBLE => {
                    reader.skip(8)?;
                    entries.push(CpInfo::Other(if tag == CONSTANT_LONG { "Long" } else { "Double" }));
                    // 8-byte constants take up two slots in the pool.
                    CpInfo::Unusable
                }
                CONSTANT_STRING => {
                    reader.skip(2)?;
                    CpInfo::Other("String")
                }
                CONSTANT_FIELDREF | CONSTANT_METHODREF | CONSTANT_INTERFACE_METHODREF => {
                    reader.skip(4)?;
                    CpInfo::Other("Ref")
                }
                CONSTANT_NAME_AND_TYPE => {
                    reader.skip(4)?;
                    CpInfo::Other("NameAndType")
                }
                CONSTANT_METHOD_HANDLE => {
                    reader.skip(3)?;
                    CpInfo::Other("MethodHandle")
                }
                CONSTANT_METHOD_TYPE => {
                    reader.skip(2)?;
                    CpInfo::Other("MethodType")
                }
                CONSTANT_DYNAMIC | CONSTANT_INVOKE_DYNAMIC => {
                    reader.skip(4)?;
                    CpInfo::Other("Dynamic")
                }
                CONSTANT_MODULE => {
                    reader.skip(2)?;
                    CpInfo::Other("Module")
                }
                CONSTANT_PACKAGE => {
                    reader.skip(2)?;
                    CpInfo::Other("Package")
                }
                other => return Err(Error::InvalidConstantPoolTag(other)),
            };
            entries.push(entry);
        }

        // A trailing Long/Double may have pushed one entry past `count`.
        entries.truncate(count.max(1));
        Ok(Self { entries })
    }

    pub(crate) fn get(&self, index: u16) -> Result<&CpInfo> {
        match self.entries.get(index as usize) {
            Some(CpInfo::Unusable) | None => Err(Error::InvalidConstantPoolIndex(index)),
            Some(entry) => Ok(entry),
        }
    }

    pub(crate) fn get_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            CpInfo::Utf8(value) => Ok(value),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Utf8",
                found: other.kind(),
            }),
        }
    }

    pub(crate) fn get_class_name(&self, index: u16) -> Result<String> {
        match self.get(index)? {
            CpInfo::Class { name_index } => Ok(self.get_utf8(*name_index)?.to_string()),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Class",
                found: other.kind(),
            }),
        }
    }
}

/// Decode the JVM's "modified UTF-8" (JVMS 4.4.7).
///
/// NUL is encoded as `C0 80` and supplementary characters as two 3-byte
/// surrogate encodings, so plain UTF-8 decoding is not enough.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    if bytes.iter().all(|&b| b != 0 && b < 0x80) {
        return String::from_utf8(bytes.to_vec()).map_err(|_| Error::InvalidModifiedUtf8);
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        match b0 {
            0x01..=0x7F => {
                units.push(b0 as u16);
                i += 1;
            }
            0xC0..=0xDF => {
                let b1 = continuation(bytes, i + 1)?;
                units.push((((b0 & 0x1F) as u16) << 6) | b1 as u16);
                i += 2;
            }
            0xE0..=0xEF => {
                let b1 = continuation(bytes, i + 1)?;
                let b2 = continuation(bytes, i + 2)?;
                units.push((((b0 & 0x0F) as u16) << 12) | ((b1 as u16) << 6) | b2 as u16);
                i += 3;
            }
            _ => return Err(Error::InvalidModifiedUtf8),
        }
    }

    String::from_utf16(&units).map_err(|_| Error::InvalidModifiedUtf8)
}

fn continuation(bytes: &[u8], index: usize) -> Result<u8> {
    match bytes.get(index) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b & 0x3F),
        _ => Err(Error::InvalidModifiedUtf8),
    }
}

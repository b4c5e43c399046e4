//! JVM field and method descriptors (JVMS 4.3).
//!
//! Besides parsing and rendering descriptors, [`FieldType::from_binary_name`]
//! accepts the names produced by `java.lang.Class#getName()` (`int`,
//! `java.lang.String`, `[J`, `[Ljava.lang.String;`), which is how callers
//! usually describe a member's parameter types.

use std::fmt;

use crate::error::{Error, Result};

/// JVMS 4.3.2: an array type descriptor has at most 255 dimensions.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn descriptor_char(self) -> char {
        match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
        }
    }

    pub fn java_name(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }

    fn from_descriptor_char(c: u8) -> Option<Self> {
        Some(match c {
            b'B' => BaseType::Byte,
            b'C' => BaseType::Char,
            b'D' => BaseType::Double,
            b'F' => BaseType::Float,
            b'I' => BaseType::Int,
            b'J' => BaseType::Long,
            b'S' => BaseType::Short,
            b'Z' => BaseType::Boolean,
            _ => return None,
        })
    }

    fn from_java_name(name: &str) -> Option<Self> {
        Some(match name {
            "byte" => BaseType::Byte,
            "char" => BaseType::Char,
            "double" => BaseType::Double,
            "float" => BaseType::Float,
            "int" => BaseType::Int,
            "long" => BaseType::Long,
            "short" => BaseType::Short,
            "boolean" => BaseType::Boolean,
            _ => return None,
        })
    }
}

/// A field type. Object types hold the *internal* name (`java/lang/String`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn object(binary_or_internal_name: &str) -> Self {
        FieldType::Object(binary_or_internal_name.replace('.', "/"))
    }

    pub fn array(component: FieldType) -> Self {
        FieldType::Array(Box::new(component))
    }

    /// Number of local-variable slots a value of this type occupies.
    pub fn slot_width(&self) -> u16 {
        match self {
            FieldType::Base(BaseType::Long | BaseType::Double) => 2,
            _ => 1,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.slot_width() == 2
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            FieldType::Base(base) => out.push(base.descriptor_char()),
            FieldType::Object(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
            FieldType::Array(component) => {
                out.push('[');
                component.write_descriptor(out);
            }
        }
    }

    /// Parse a `Class#getName()` style type name.
    pub fn from_binary_name(name: &str) -> Result<Self> {
        if name.is_empty() || name == "void" {
            return Err(Error::InvalidTypeName(name.to_string()));
        }
        if name.starts_with('[') {
            // Array class names are descriptors with `.` separators.
            return parse_field_descriptor(&name.replace('.', "/"))
                .map_err(|_| Error::InvalidTypeName(name.to_string()));
        }
        if let Some(base) = BaseType::from_java_name(name) {
            return Ok(FieldType::Base(base));
        }
        if name.contains(['/', ';', '[']) {
            return Err(Error::InvalidTypeName(name.to_string()));
        }
        Ok(FieldType::object(name))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(base) => f.write_str(base.java_name()),
            FieldType::Object(name) => f.write_str(&name.replace('/', ".")),
            FieldType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

impl ReturnType {
    /// Like [`FieldType::from_binary_name`], additionally accepting `void`.
    pub fn from_binary_name(name: &str) -> Result<Self> {
        if name == "void" {
            Ok(ReturnType::Void)
        } else {
            FieldType::from_binary_name(name).map(ReturnType::Type)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

impl MethodDescriptor {
    pub fn new(params: Vec<FieldType>, return_type: ReturnType) -> Self {
        Self {
            params,
            return_type,
        }
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::from("(");
        for param in &self.params {
            param.write_descriptor(&mut out);
        }
        out.push(')');
        match &self.return_type {
            ReturnType::Void => out.push('V'),
            ReturnType::Type(ty) => ty.write_descriptor(&mut out),
        }
        out
    }
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let (ty, rest) = parse_field_type(desc)?;
    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());

    let mut rest = desc.strip_prefix('(').ok_or_else(invalid)?;
    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        if rest.is_empty() {
            return Err(invalid());
        }
        let (param, after) = parse_field_type(rest).map_err(|_| invalid())?;
        params.push(param);
        rest = after;
    }

    let return_type = if rest == "V" {
        ReturnType::Void
    } else {
        ReturnType::Type(parse_field_descriptor(rest).map_err(|_| invalid())?)
    };

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn parse_field_type(input: &str) -> Result<(FieldType, &str)> {
    let invalid = || Error::InvalidDescriptor(input.to_string());

    let dimensions = input.bytes().take_while(|&b| b == b'[').count();
    if dimensions > MAX_ARRAY_DIMENSIONS {
        return Err(invalid());
    }
    let element = &input[dimensions..];
    let first = *element.as_bytes().first().ok_or_else(invalid)?;

    let (mut ty, rest) = if let Some(base) = BaseType::from_descriptor_char(first) {
        (FieldType::Base(base), &element[1..])
    } else if first == b'L' {
        let end = element.find(';').ok_or_else(invalid)?;
        let name = &element[1..end];
        if name.is_empty() {
            return Err(invalid());
        }
        (FieldType::Object(name.to_string()), &element[end + 1..])
    } else {
        return Err(invalid());
    };

    for _ in 0..dimensions {
        ty = FieldType::array(ty);
    }
    Ok((ty, rest))
}

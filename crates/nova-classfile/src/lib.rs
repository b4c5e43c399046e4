//! Streaming decoder for JVM class files.
//!
//! Only the parts needed to inspect method bodies are decoded: the constant
//! pool, the method table, and (on demand) each method's `Code` attribute with
//! its `LocalVariableTable`. Nothing here writes class files.

#![forbid(unsafe_code)]

mod classfile;
mod code;
mod constant_pool;
mod descriptor;
mod error;
mod reader;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::classfile::{ClassFile, ClassMember, ACC_ABSTRACT, ACC_NATIVE, ACC_STATIC};
pub use crate::code::{CodeAttribute, LocalVariable};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, MAX_ARRAY_DIMENSIONS};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};

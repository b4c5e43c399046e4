use std::fmt;

use nova_classfile::{parse_method_descriptor, FieldType, MethodDescriptor, ReturnType};

/// Suffix of compiled type resources.
pub const CLASS_FILE_SUFFIX: &str = ".class";

const CONSTRUCTOR_NAME: &str = "<init>";

/// Binary name of a compiled type, as returned by `Class#getName()`
/// (`com.example.Outer$Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    pub fn new(binary_name: impl Into<String>) -> Self {
        Self(binary_name.into())
    }

    /// From a JVM internal name (`com/example/Foo`).
    pub fn from_internal_name(internal_name: &str) -> Self {
        Self(internal_name.replace('/', "."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the last `.`; nested types keep their `$` suffix.
    pub fn simple_name(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((_, simple)) => simple,
            None => &self.0,
        }
    }

    /// Dotted package name; empty for the default package.
    pub fn package(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((package, _)) => package,
            None => "",
        }
    }

    pub fn internal_name(&self) -> String {
        self.0.replace('.', "/")
    }

    /// `<simple-name>.class`, the resource name relative to the package.
    pub fn resource_name(&self) -> String {
        format!("{}{CLASS_FILE_SUFFIX}", self.simple_name())
    }

    /// `/`-separated resource path relative to a classpath root.
    pub fn resource_path(&self) -> String {
        let package = self.package();
        if package.is_empty() {
            self.resource_name()
        } else {
            format!("{}/{}", package.replace('.', "/"), self.resource_name())
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method { name: String, return_type: ReturnType },
    Constructor,
}

/// Uniquely identifies a method or constructor; the key of the name cache.
///
/// Equality covers the full erased signature so overloads never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberIdentity {
    pub declaring_type: TypeIdentity,
    pub kind: MemberKind,
    pub parameter_types: Vec<FieldType>,
    pub is_static: bool,
}

impl MemberIdentity {
    /// Name as it appears in the class file (`<init>` for constructors).
    pub fn name(&self) -> &str {
        match &self.kind {
            MemberKind::Method { name, .. } => name,
            MemberKind::Constructor => CONSTRUCTOR_NAME,
        }
    }

    pub fn return_type(&self) -> ReturnType {
        match &self.kind {
            MemberKind::Method { return_type, .. } => return_type.clone(),
            MemberKind::Constructor => ReturnType::Void,
        }
    }

    /// JVM method descriptor, e.g. `(IJLjava/lang/String;)V`.
    pub fn descriptor(&self) -> String {
        MethodDescriptor::new(self.parameter_types.clone(), self.return_type()).descriptor()
    }
}

impl fmt::Display for MemberIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MemberKind::Method { name, .. } => write!(f, "{}#{name}(", self.declaring_type)?,
            MemberKind::Constructor => write!(f, "{}#<init>(", self.declaring_type)?,
        }
        for (i, ty) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        f.write_str(")")
    }
}

/// Structural description of a method, as a reflection layer would supply it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub declaring_type: TypeIdentity,
    pub name: String,
    pub parameter_types: Vec<FieldType>,
    pub return_type: ReturnType,
    pub is_static: bool,
}

impl MethodRef {
    /// Build from a JVM descriptor such as `(IJ)Ljava/lang/String;`.
    pub fn from_descriptor(
        declaring_type: impl Into<TypeIdentity>,
        name: &str,
        descriptor: &str,
        is_static: bool,
    ) -> nova_classfile::Result<Self> {
        let MethodDescriptor {
            params,
            return_type,
        } = parse_method_descriptor(descriptor)?;
        Ok(Self {
            declaring_type: declaring_type.into(),
            name: name.to_string(),
            parameter_types: params,
            return_type,
            is_static,
        })
    }

    /// Build from `Class#getName()` spellings (`int`, `[J`, `java.lang.String`).
    pub fn from_binary_names(
        declaring_type: impl Into<TypeIdentity>,
        name: &str,
        parameter_types: &[&str],
        return_type: &str,
        is_static: bool,
    ) -> nova_classfile::Result<Self> {
        Ok(Self {
            declaring_type: declaring_type.into(),
            name: name.to_string(),
            parameter_types: parameter_types
                .iter()
                .map(|ty| FieldType::from_binary_name(ty))
                .collect::<nova_classfile::Result<_>>()?,
            return_type: ReturnType::from_binary_name(return_type)?,
            is_static,
        })
    }
}

impl From<&MethodRef> for MemberIdentity {
    fn from(method: &MethodRef) -> Self {
        MemberIdentity {
            declaring_type: method.declaring_type.clone(),
            kind: MemberKind::Method {
                name: method.name.clone(),
                return_type: method.return_type.clone(),
            },
            parameter_types: method.parameter_types.clone(),
            is_static: method.is_static,
        }
    }
}

/// Structural description of a constructor. Constructors are never static.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorRef {
    pub declaring_type: TypeIdentity,
    pub parameter_types: Vec<FieldType>,
}

impl ConstructorRef {
    pub fn new(declaring_type: impl Into<TypeIdentity>, parameter_types: Vec<FieldType>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            parameter_types,
        }
    }

    pub fn from_binary_names(
        declaring_type: impl Into<TypeIdentity>,
        parameter_types: &[&str],
    ) -> nova_classfile::Result<Self> {
        Ok(Self::new(
            declaring_type,
            parameter_types
                .iter()
                .map(|ty| FieldType::from_binary_name(ty))
                .collect::<nova_classfile::Result<_>>()?,
        ))
    }
}

impl From<&ConstructorRef> for MemberIdentity {
    fn from(ctor: &ConstructorRef) -> Self {
        MemberIdentity {
            declaring_type: ctor.declaring_type.clone(),
            kind: MemberKind::Constructor,
            parameter_types: ctor.parameter_types.clone(),
            is_static: false,
        }
    }
}

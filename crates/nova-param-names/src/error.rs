use thiserror::Error;

use crate::identity::TypeIdentity;

/// Failures while loading or inspecting a class file.
///
/// Everything except [`LookupError::InvariantViolation`] is a routine miss and
/// is turned into an unresolved outcome by the name cache.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("class file for {type_name} not found")]
    ResourceNotFound { type_name: TypeIdentity },

    #[error("failed to read class file for {type_name}: {source}")]
    Io {
        type_name: TypeIdentity,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed class file for {type_name}: {source}")]
    MalformedResource {
        type_name: TypeIdentity,
        #[source]
        source: nova_classfile::Error,
    },

    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
}

/// The class file and the requested member disagree in a way a well-formed
/// compiler output never would.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{count} members of {type_name} match {name}{descriptor}")]
    DuplicateMember {
        type_name: TypeIdentity,
        name: String,
        descriptor: String,
        count: usize,
    },

    #[error("{member} was requested as {requested} but the class file declares it {declared}")]
    StaticMismatch {
        member: String,
        requested: &'static str,
        declared: &'static str,
    },

    #[error("local variable `{name}` of {member} is live at entry in slot {slot}, which no parameter occupies")]
    SlotOutsidePlan {
        member: String,
        name: String,
        slot: u16,
    },
}

/// Why a lookup produced no names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedReason {
    ResourceNotFound,
    MalformedResource,
    MemberNotFound,
    DebugInfoAbsent,
}

impl UnresolvedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnresolvedReason::ResourceNotFound => "resource_not_found",
            UnresolvedReason::MalformedResource => "malformed_resource",
            UnresolvedReason::MemberNotFound => "member_not_found",
            UnresolvedReason::DebugInfoAbsent => "debug_info_absent",
        }
    }
}

impl LookupError {
    /// Splits routine misses from invariant violations.
    pub(crate) fn unresolved_reason(&self) -> Result<UnresolvedReason, &InvariantViolation> {
        match self {
            LookupError::ResourceNotFound { .. } | LookupError::Io { .. } => {
                Ok(UnresolvedReason::ResourceNotFound)
            }
            LookupError::MalformedResource { .. } => Ok(UnresolvedReason::MalformedResource),
            LookupError::InvariantViolation(violation) => Err(violation),
        }
    }
}

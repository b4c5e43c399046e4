use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{InvariantViolation, LookupError, UnresolvedReason};
use crate::identity::MemberIdentity;

/// Parameter names in declaration order.
pub type ParameterNames = Arc<[String]>;

/// Cached outcome of a member lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ParameterNames),
    Unresolved(UnresolvedReason),
}

impl Resolution {
    pub fn names(&self) -> Option<&ParameterNames> {
        match self {
            Resolution::Resolved(names) => Some(names),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn into_names(self) -> Option<ParameterNames> {
        match self {
            Resolution::Resolved(names) => Some(names),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Write-once map from member to lookup outcome.
///
/// Misses are computed outside the lock. When two threads race on the same
/// member the first insert wins and both callers return that value.
#[derive(Debug, Default)]
pub struct ParameterNameCache {
    entries: RwLock<HashMap<MemberIdentity, Resolution>>,
}

impl ParameterNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, member: &MemberIdentity) -> Option<Resolution> {
        self.entries.read().get(member).cloned()
    }

    /// Returns the cached outcome for `member`, running `compute` on a miss.
    ///
    /// Lookup errors become [`Resolution::Unresolved`] and are cached;
    /// invariant violations are returned and leave the cache untouched.
    pub fn get_or_compute<F>(
        &self,
        member: &MemberIdentity,
        compute: F,
    ) -> Result<Resolution, InvariantViolation>
    where
        F: FnOnce() -> Result<Resolution, LookupError>,
    {
        if let Some(cached) = self.get(member) {
            tracing::trace!(target: "nova.param_names", %member, "parameter name cache hit");
            return Ok(cached);
        }

        let resolution = match compute() {
            Ok(resolution) => resolution,
            Err(err) => match err.unresolved_reason() {
                Ok(reason) => {
                    tracing::debug!(
                        target: "nova.param_names",
                        %member,
                        reason = reason.as_str(),
                        error = %err,
                        "parameter names unavailable"
                    );
                    Resolution::Unresolved(reason)
                }
                Err(violation) => {
                    tracing::warn!(
                        target: "nova.param_names",
                        %member,
                        error = %violation,
                        "class file is inconsistent with the requested member"
                    );
                    return Err(violation.clone());
                }
            },
        };

        if let Resolution::Unresolved(
            reason @ (UnresolvedReason::MemberNotFound | UnresolvedReason::DebugInfoAbsent),
        ) = &resolution
        {
            tracing::debug!(
                target: "nova.param_names",
                %member,
                reason = reason.as_str(),
                "parameter names unavailable"
            );
        }

        let mut entries = self.entries.write();
        Ok(entries.entry(member.clone()).or_insert(resolution).clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

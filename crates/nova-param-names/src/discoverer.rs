use std::sync::Arc;

use crate::class_cache::ClassFileCache;
use crate::config::DiscovererConfig;
use crate::error::{InvariantViolation, LookupError, UnresolvedReason};
use crate::identity::{ConstructorRef, MemberIdentity, MethodRef};
use crate::local_vars::read_parameter_names;
use crate::locator::ClassResourceLocator;
use crate::matcher::find_member;
use crate::name_cache::{ParameterNameCache, ParameterNames, Resolution};
use crate::slots::SlotPlan;

/// Recovers source parameter names of methods and constructors from the
/// local variable tables of compiled class files.
///
/// Construct one per process and share it (it is `Send + Sync`); both caches
/// live as long as the discoverer.
#[derive(Debug)]
pub struct ParameterNameDiscoverer {
    classes: ClassFileCache,
    names: ParameterNameCache,
}

impl ParameterNameDiscoverer {
    pub fn new(locator: Arc<dyn ClassResourceLocator>) -> Self {
        Self {
            classes: ClassFileCache::new(locator),
            names: ParameterNameCache::new(),
        }
    }

    pub fn from_config(config: &DiscovererConfig) -> Self {
        Self::new(Arc::new(config.classpath()))
    }

    /// Parameter names of `method`, or `None` if they cannot be recovered.
    pub fn resolve_method_parameter_names(&self, method: &MethodRef) -> Option<ParameterNames> {
        self.resolve(&MemberIdentity::from(method))
    }

    /// Parameter names of `ctor`, or `None` if they cannot be recovered.
    pub fn resolve_constructor_parameter_names(
        &self,
        ctor: &ConstructorRef,
    ) -> Option<ParameterNames> {
        self.resolve(&MemberIdentity::from(ctor))
    }

    /// Like the `resolve_*` methods but reports why no names were found.
    pub fn lookup(&self, member: &MemberIdentity) -> Result<Resolution, InvariantViolation> {
        self.names.get_or_compute(member, || self.compute(member))
    }

    pub fn class_cache(&self) -> &ClassFileCache {
        &self.classes
    }

    pub fn name_cache(&self) -> &ParameterNameCache {
        &self.names
    }

    fn resolve(&self, member: &MemberIdentity) -> Option<ParameterNames> {
        // Violations were logged by the name cache.
        self.lookup(member).ok()?.into_names()
    }

    fn compute(&self, member: &MemberIdentity) -> Result<Resolution, LookupError> {
        let class = self.classes.get(&member.declaring_type)?;
        let descriptor = member.descriptor();
        let Some(found) = find_member(&class, member.name(), &descriptor)? else {
            return Ok(Resolution::Unresolved(UnresolvedReason::MemberNotFound));
        };

        let plan = SlotPlan::new(member.is_static, &member.parameter_types);
        Ok(
            match read_parameter_names(&class, found, member.is_static, &plan)? {
                Some(names) => Resolution::Resolved(names),
                None => Resolution::Unresolved(UnresolvedReason::DebugInfoAbsent),
            },
        )
    }
}

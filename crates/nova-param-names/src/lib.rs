//! Parameter name discovery for compiled JVM classes.
//!
//! Names are read from the `LocalVariableTable` that `javac -g` emits. The
//! entry points are [`ParameterNameDiscoverer::resolve_method_parameter_names`]
//! and [`ParameterNameDiscoverer::resolve_constructor_parameter_names`]; both
//! return `None` when the class file, the member, or its debug info is
//! unavailable.
//!
//! Two caches sit behind a discoverer: parsed class files per type
//! ([`ClassFileCache`]) and lookup outcomes per member
//! ([`ParameterNameCache`]).

#![forbid(unsafe_code)]

mod class_cache;
pub mod config;
mod discoverer;
mod error;
mod identity;
mod local_vars;
mod locator;
mod matcher;
mod name_cache;
mod slots;

pub use class_cache::ClassFileCache;
pub use config::{ConfigError, DiscovererConfig, LoggingConfig};
pub use discoverer::ParameterNameDiscoverer;
pub use error::{InvariantViolation, LookupError, UnresolvedReason};
pub use identity::{
    ConstructorRef, MemberIdentity, MemberKind, MethodRef, TypeIdentity, CLASS_FILE_SUFFIX,
};
pub use local_vars::read_parameter_names;
pub use locator::{
    ClassDirLocator, ClassResourceLocator, Classpath, ClasspathEntry, InMemoryLocator, JarLocator,
};
pub use matcher::find_member;
pub use name_cache::{ParameterNameCache, ParameterNames, Resolution};
pub use slots::SlotPlan;

pub use nova_classfile::{BaseType, FieldType, ReturnType};

//! Where class files come from.
//!
//! A type's class file is the resource `<simple-name>.class` inside the
//! directory of its package, i.e. [`TypeIdentity::resource_path`] relative to
//! a classpath root. Locators only find bytes; parsing happens in the class
//! file cache.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LookupError;
use crate::identity::TypeIdentity;

pub trait ClassResourceLocator: Send + Sync + fmt::Debug {
    /// Returns the class file bytes for `ty`, or `Ok(None)` if this locator
    /// has no resource for it.
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError>;
}

/// A directory of compiled classes laid out by package (`target/classes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDirLocator {
    root: PathBuf,
}

impl ClassDirLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn class_path(&self, ty: &TypeIdentity) -> PathBuf {
        let mut path = self.root.clone();
        for segment in ty.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(ty.resource_name());
        path
    }
}

impl ClassResourceLocator for ClassDirLocator {
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError> {
        let path = self.class_path(ty);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LookupError::Io {
                type_name: ty.clone(),
                source,
            }),
        }
    }
}

/// A jar (zip) archive; entries are looked up by resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarLocator {
    path: PathBuf,
}

impl JarLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClassResourceLocator for JarLocator {
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError> {
        let io_error = |source: io::Error| LookupError::Io {
            type_name: ty.clone(),
            source,
        };

        let file = std::fs::File::open(&self.path).map_err(io_error)?;
        let mut archive = zip::ZipArchive::new(file).map_err(|err| io_error(zip_to_io(err)))?;
        let mut entry = match archive.by_name(&ty.resource_path()) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(io_error(zip_to_io(err))),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes).map_err(io_error)?;
        Ok(Some(bytes))
    }
}

fn zip_to_io(err: zip::result::ZipError) -> io::Error {
    match err {
        zip::result::ZipError::Io(err) => err,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

/// Class files held in memory, keyed by resource path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocator {
    classes: HashMap<String, Arc<[u8]>>,
}

impl InMemoryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ty: impl Into<TypeIdentity>, bytes: impl Into<Arc<[u8]>>) {
        self.classes.insert(ty.into().resource_path(), bytes.into());
    }

    pub fn with_class(mut self, ty: impl Into<TypeIdentity>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(ty, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassResourceLocator for InMemoryLocator {
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError> {
        Ok(self.classes.get(&ty.resource_path()).map(|bytes| bytes.to_vec()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    ClassDir(PathBuf),
    Jar(PathBuf),
}

impl ClasspathEntry {
    pub fn path(&self) -> &Path {
        match self {
            ClasspathEntry::ClassDir(p) | ClasspathEntry::Jar(p) => p,
        }
    }
}

impl ClassResourceLocator for ClasspathEntry {
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError> {
        match self {
            ClasspathEntry::ClassDir(dir) => ClassDirLocator::new(dir.clone()).find(ty),
            ClasspathEntry::Jar(jar) => JarLocator::new(jar.clone()).find(ty),
        }
    }
}

/// An ordered list of classpath entries; the first entry that has the class
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<ClasspathEntry>,
}

impl Classpath {
    pub fn new(entries: Vec<ClasspathEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }
}

impl ClassResourceLocator for Classpath {
    fn find(&self, ty: &TypeIdentity) -> Result<Option<Vec<u8>>, LookupError> {
        for entry in &self.entries {
            match entry.find(ty) {
                Ok(Some(bytes)) => return Ok(Some(bytes)),
                Ok(None) => {}
                Err(err) => {
                    // An unreadable entry only hides its own classes.
                    tracing::debug!(
                        target: "nova.param_names",
                        entry = %entry.path().display(),
                        type_name = %ty,
                        error = %err,
                        "failed to read classpath entry"
                    );
                }
            }
        }
        Ok(None)
    }
}

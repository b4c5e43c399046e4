use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nova_classfile::ClassFile;
use parking_lot::Mutex;

use crate::error::LookupError;
use crate::identity::TypeIdentity;
use crate::locator::ClassResourceLocator;

/// Parsed class files keyed by type, loaded on first use and kept for the
/// lifetime of the cache.
///
/// The whole get-or-create runs under one lock, so concurrent first requests
/// for a type read and parse it exactly once. Failed loads are not
/// remembered.
pub struct ClassFileCache {
    locator: Arc<dyn ClassResourceLocator>,
    classes: Mutex<HashMap<TypeIdentity, Arc<ClassFile>>>,
    loads: AtomicUsize,
}

impl ClassFileCache {
    pub fn new(locator: Arc<dyn ClassResourceLocator>) -> Self {
        Self {
            locator,
            classes: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, ty: &TypeIdentity) -> Result<Arc<ClassFile>, LookupError> {
        let mut classes = self.classes.lock();
        if let Some(class) = classes.get(ty) {
            tracing::trace!(target: "nova.param_names", type_name = %ty, "class file cache hit");
            return Ok(Arc::clone(class));
        }

        let bytes = self
            .locator
            .find(ty)?
            .ok_or_else(|| LookupError::ResourceNotFound {
                type_name: ty.clone(),
            })?;
        let class =
            ClassFile::parse_owned(bytes).map_err(|source| LookupError::MalformedResource {
                type_name: ty.clone(),
                source,
            })?;

        self.loads.fetch_add(1, Ordering::Relaxed);
        let class = Arc::new(class);
        classes.insert(ty.clone(), Arc::clone(&class));
        Ok(class)
    }

    /// Number of cached class files.
    pub fn len(&self) -> usize {
        self.classes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of class files parsed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for ClassFileCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassFileCache")
            .field("locator", &self.locator)
            .field("len", &self.len())
            .field("load_count", &self.load_count())
            .finish()
    }
}

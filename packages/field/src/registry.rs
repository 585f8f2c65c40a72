//! The lazily built, process-lifetime field registry.

use std::sync::{Mutex, OnceLock, PoisonError};

use fieldmap_field_models::{FieldRecord, Point};

use crate::RegistryError;
use crate::fields::{FieldSet, build_field_set};
use crate::paths::FieldSources;

/// Field registry over a pair of KML documents.
///
/// The [`FieldSet`] is built on the first query and kept for the lifetime
/// of the registry. It is never rebuilt: later changes to the documents on
/// disk are not observed. A failed build is not remembered, so the next
/// query tries again from scratch.
///
/// Builds are serialized by an internal lock so concurrent first queries
/// trigger a single parse. Once built, queries read the cached set without
/// locking.
pub struct FieldRegistry {
    sources: FieldSources,
    cache: OnceLock<FieldSet>,
    build_lock: Mutex<()>,
}

impl FieldRegistry {
    #[must_use]
    pub const fn new(sources: FieldSources) -> Self {
        Self {
            sources,
            cache: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// Creates a registry over the documents named by `FIELDS_KML` and
    /// `CENTROIDS_KML` (see [`FieldSources::from_env`]).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(FieldSources::from_env())
    }

    #[must_use]
    pub const fn sources(&self) -> &FieldSources {
        &self.sources
    }

    /// Whether the field set has been built successfully.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Returns the cached field set, building it first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the build runs and either document cannot be
    /// read or parsed.
    pub fn field_set(&self) -> Result<&FieldSet, RegistryError> {
        if let Some(set) = self.cache.get() {
            return Ok(set);
        }

        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished the build while we waited.
        if let Some(set) = self.cache.get() {
            return Ok(set);
        }

        log::info!(
            "Building field registry from {} and {}",
            self.sources.fields.display(),
            self.sources.centroids.display()
        );
        let set = build_field_set(&self.sources).inspect_err(|e| {
            log::error!("Field registry build failed: {e}");
        })?;

        Ok(self.cache.get_or_init(|| set))
    }

    /// All fields in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has to be built and the build fails.
    pub fn list_fields(&self) -> Result<&[FieldRecord], RegistryError> {
        Ok(self.field_set()?.records())
    }

    /// Area in square metres of the field with `id`, or `None` if there is
    /// no such field.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has to be built and the build fails.
    pub fn get_size(&self, id: &str) -> Result<Option<f64>, RegistryError> {
        Ok(self.field_set()?.size(id))
    }

    /// Distance in metres from the center of field `id` to `point`, or
    /// `None` if there is no such field.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has to be built and the build fails.
    pub fn get_distance(&self, id: &str, point: Point) -> Result<Option<f64>, RegistryError> {
        Ok(self.field_set()?.distance(id, point))
    }

    /// The first field in document order containing `point`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry has to be built and the build fails.
    pub fn find_containing(&self, point: Point) -> Result<Option<&FieldRecord>, RegistryError> {
        Ok(self.field_set()?.find_containing(point))
    }
}

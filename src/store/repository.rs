//! Patient repository: existence-checked operations over a store backend.
//!
//! Every operation runs a full load, mutate, save cycle against the
//! backend. One process-wide lock spans the whole cycle so cycles never
//! interleave within this process; the lock is never held across an await.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::metrics::{self, BracketPolicy};
use crate::models::{NewPatient, PatientPatch, PatientView, SortField, SortOrder};

use super::backend::StoreBackend;
use super::StoreError;

pub struct PatientRepository {
    backend: Mutex<Box<dyn StoreBackend>>,
    policy: BracketPolicy,
}

impl PatientRepository {
    pub fn new(backend: impl StoreBackend + 'static, policy: BracketPolicy) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
            policy,
        }
    }

    /// Fetch one record with derived fields recomputed.
    pub fn get(&self, id: &str) -> Result<PatientView, StoreError> {
        let backend = self.lock()?;
        let registry = backend.load_all()?;
        let record = registry.get(id).ok_or_else(|| StoreError::NotFound { id: id.into() })?;
        Ok(record.with_derived(self.policy)?)
    }

    /// The whole registry keyed by id, derived fields included.
    pub fn list_all(&self) -> Result<BTreeMap<String, PatientView>, StoreError> {
        let backend = self.lock()?;
        let registry = backend.load_all()?;
        registry
            .iter()
            .map(|(id, record)| Ok((id.clone(), record.with_derived(self.policy)?)))
            .collect()
    }

    /// Validate and insert a new record. The id must be unused.
    pub fn create(&self, record: NewPatient) -> Result<(), StoreError> {
        record.validate()?;
        let mut backend = self.lock()?;
        let mut registry = backend.load_all()?;
        let (id, body) = record.into_parts();
        if registry.contains_key(&id) {
            return Err(StoreError::AlreadyExists { id });
        }
        registry.insert(id, body);
        backend.save_all(&registry)
    }

    /// Merge a partial payload into an existing record. The patch fields
    /// are checked first, then the merged whole, before anything is
    /// written back.
    pub fn update(&self, id: &str, patch: PatientPatch) -> Result<(), StoreError> {
        let mut backend = self.lock()?;
        let mut registry = backend.load_all()?;
        let record = registry
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.into() })?;

        patch.validate()?;
        let mut merged = record.clone();
        merged.apply(patch);
        merged.validate()?;

        *record = merged;
        backend.save_all(&registry)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut backend = self.lock()?;
        let mut registry = backend.load_all()?;
        if registry.remove(id).is_none() {
            return Err(StoreError::NotFound { id: id.into() });
        }
        backend.save_all(&registry)
    }

    /// All records ordered by a derived or stored numeric field. Ties keep
    /// id order. A record whose bmi cannot be derived sorts as zero rather
    /// than failing the whole listing.
    pub fn sort_by(&self, field: SortField, order: SortOrder) -> Result<Vec<PatientView>, StoreError> {
        let backend = self.lock()?;
        let registry = backend.load_all()?;

        let mut entries: Vec<(f64, PatientView)> = registry
            .values()
            .map(|record| {
                let bmi = metrics::bmi(record.weight, record.height).unwrap_or(0.0);
                let key = match field {
                    SortField::Height => record.height,
                    SortField::Weight => record.weight,
                    SortField::Bmi => bmi,
                };
                (key, record.view_with_bmi(bmi, self.policy))
            })
            .collect();

        match order {
            SortOrder::Asc => {
                entries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
            }
            SortOrder::Desc => {
                entries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal))
            }
        }

        Ok(entries.into_iter().map(|(_, view)| view).collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn StoreBackend>>, StoreError> {
        self.backend.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use jevxo_app::{EntityId, Patch, Record};
use time::Date;

/// In-memory collection of one entity type, kept in insertion order.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: Vec<T>,
    last_id: i64,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next created record will receive. Never reuses an
    /// identifier that was seeded or inserted before.
    pub fn next_id(&self) -> T::Id {
        T::Id::new(self.last_id + 1)
    }

    /// Builds an unsaved record from defaults plus `patch`.
    pub fn draft(&self, patch: &Patch, today: Date) -> Result<T> {
        let mut record = T::blank(self.next_id(), today);
        record
            .merge(patch)
            .with_context(|| format!("build new {}", T::ENTITY.label()))?;
        Ok(record)
    }

    pub fn insert(&mut self, record: T) -> Result<T::Id> {
        let id = record.id();
        if id.get() <= 0 {
            bail!("{} id must be positive, got {id}", T::ENTITY.label());
        }
        if self.get(id).is_some() {
            bail!("{} {id} already exists", T::ENTITY.label());
        }
        self.last_id = self.last_id.max(id.get());
        self.records.push(record);
        Ok(id)
    }

    pub fn create(&mut self, patch: &Patch, today: Date) -> Result<&T> {
        let record = self.draft(patch, today)?;
        self.insert(record)?;
        self.records
            .last()
            .with_context(|| format!("{} vanished after insert", T::ENTITY.label()))
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Merges `patch` into the record. `Ok(None)` when `id` is absent.
    pub fn update(&mut self, id: T::Id, patch: &Patch) -> Result<Option<&T>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        self.records[index]
            .merge(patch)
            .with_context(|| format!("update {} {id}", T::ENTITY.label()))?;
        Ok(Some(&self.records[index]))
    }

    /// Swaps in a fully built record with an existing identifier.
    pub fn replace(&mut self, record: T) -> Result<()> {
        let id = record.id();
        let Some(index) = self.position(id) else {
            bail!("{} {id} not found -- refresh the list and retry", T::ENTITY.label());
        };
        self.records[index] = record;
        Ok(())
    }

    /// Removes by identifier. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.records.iter_mut()
    }

    /// Loads records that already carry identifiers.
    pub fn seed(&mut self, records: impl IntoIterator<Item = T>) -> Result<usize> {
        let mut count = 0;
        for record in records {
            self.insert(record)
                .with_context(|| format!("seed {}", T::ENTITY.label()))?;
            count += 1;
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use anyhow::Result;
    use jevxo_app::{Branch, BranchId, FieldValue, Patch, Record};
    use time::macros::date;

    const TODAY: time::Date = date!(2025 - 06 - 01);

    fn named(name: &str) -> Patch {
        Patch::new()
            .with("name", FieldValue::text(name))
            .with("location", FieldValue::text("Austin"))
    }

    #[test]
    fn create_appends_with_fresh_ids() -> Result<()> {
        let mut store = RecordStore::<Branch>::new();
        let first = store.create(&named("North"), TODAY)?.id();
        let second = store.create(&named("South"), TODAY)?.id();
        assert_ne!(first, second);
        let names = store.list().iter().map(|b| b.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["North", "South"]);
        Ok(())
    }

    #[test]
    fn seeded_ids_are_never_reissued() -> Result<()> {
        let mut store = RecordStore::<Branch>::new();
        let mut seeded = Branch::blank(BranchId::new(7), TODAY);
        seeded.name = "HQ".to_owned();
        store.seed([seeded.clone()])?;
        assert!(store.seed([seeded]).is_err());

        let created = store.create(&named("Annex"), TODAY)?.id();
        assert_eq!(created, BranchId::new(8));
        store.remove(created);
        assert_eq!(store.next_id(), BranchId::new(9));
        Ok(())
    }

    #[test]
    fn update_changes_only_patched_field() -> Result<()> {
        let mut store = RecordStore::<Branch>::new();
        let id = store.create(&named("North"), TODAY)?.id();
        let updated = store
            .update(id, &Patch::new().with("location", FieldValue::text("Denver")))?
            .expect("branch exists");
        assert_eq!(updated.name, "North");
        assert_eq!(updated.location, "Denver");
        Ok(())
    }

    #[test]
    fn update_missing_id_is_none_and_bad_patch_is_untouched() -> Result<()> {
        let mut store = RecordStore::<Branch>::new();
        let id = store.create(&named("North"), TODAY)?.id();
        assert!(store.update(BranchId::new(99), &named("Ghost"))?.is_none());

        let bad = Patch::new()
            .with("name", FieldValue::text("Renamed"))
            .with("location", FieldValue::Money(5));
        assert!(store.update(id, &bad).is_err());
        assert_eq!(store.get(id).map(|b| b.name.as_str()), Some("North"));
        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> Result<()> {
        let mut store = RecordStore::<Branch>::new();
        let id = store.create(&named("North"), TODAY)?.id();
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
        Ok(())
    }
}

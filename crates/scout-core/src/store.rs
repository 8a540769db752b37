//! The record store: single source of truth for one dataset
//!
//! Every mutation validates its input before touching the record set, so
//! a failed operation leaves the store exactly as it was. Both visual
//! projections are pure functions of this store (see `sync`); nothing
//! else holds record state.

use tracing::debug;

use crate::error::CoreError;
use crate::record::{missing_required, RawRow, Record, RecordId};
use crate::schema::DatasetSchema;

/// In-memory ordered record set for one dataset
#[derive(Debug, Clone)]
pub struct RecordStore {
    schema: DatasetSchema,
    records: Vec<Record>,
    /// Next id to hand out; monotonic so ids are never reused within a
    /// session, even after the highest record is deleted
    next_id: RecordId,
}

impl RecordStore {
    pub fn new(schema: DatasetSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            next_id: 0,
        }
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Ordered read-only view of the current record set
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record with the given id
    pub fn get(&self, id: RecordId) -> Result<&Record, CoreError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(CoreError::NotFound { id })
    }

    /// Replace the entire record set at session start
    pub fn load(&mut self, rows: &[RawRow]) -> Result<(), CoreError> {
        self.replace_all(rows)
    }

    /// Atomic bulk replace: either every row is accepted or none is.
    ///
    /// Incoming rows must carry every expected column; any id-like
    /// column in the input is ignored and ids are reassigned
    /// sequentially from 0.
    pub fn replace_all(&mut self, rows: &[RawRow]) -> Result<(), CoreError> {
        let missing = self.missing_columns(rows);
        if !missing.is_empty() {
            return Err(CoreError::Schema { missing });
        }

        self.records = rows
            .iter()
            .enumerate()
            .map(|(idx, raw)| Record::from_raw(&self.schema, raw, idx as RecordId))
            .collect();
        self.next_id = self.records.len() as RecordId;
        debug!(dataset = %self.schema.title, rows = self.records.len(), "record set replaced");
        Ok(())
    }

    /// Validate and append a new record from form input.
    ///
    /// Fails with `Validation` listing every missing required field;
    /// the store is untouched on failure.
    pub fn add(&mut self, raw: &RawRow) -> Result<RecordId, CoreError> {
        let missing = missing_required(&self.schema, raw);
        if !missing.is_empty() {
            return Err(CoreError::Validation { missing });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.records.push(Record::from_raw(&self.schema, raw, id));
        debug!(dataset = %self.schema.title, id, "record added");
        Ok(id)
    }

    /// Re-parse an existing record from edited raw values, keeping its id
    pub fn update(&mut self, id: RecordId, raw: &RawRow) -> Result<(), CoreError> {
        let missing = missing_required(&self.schema, raw);
        if !missing.is_empty() {
            return Err(CoreError::Validation { missing });
        }

        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::NotFound { id })?;
        self.records[idx] = Record::from_raw(&self.schema, raw, id);
        debug!(dataset = %self.schema.title, id, "record updated");
        Ok(())
    }

    /// Remove the record with the given id.
    ///
    /// The caller is responsible for confirming the deletion with the
    /// user first.
    pub fn delete(&mut self, id: RecordId) -> Result<Record, CoreError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::NotFound { id })?;
        let removed = self.records.remove(idx);
        debug!(dataset = %self.schema.title, id, "record deleted");
        Ok(removed)
    }

    /// Expected columns absent from any incoming row, in schema order.
    ///
    /// Header-driven CSV input always yields uniform rows, but rows
    /// built programmatically may not, so every row is checked. An empty
    /// import is a valid empty record set.
    fn missing_columns(&self, rows: &[RawRow]) -> Vec<String> {
        self.schema
            .fields
            .iter()
            .filter(|spec| rows.iter().any(|row| !row.contains_key(&spec.name)))
            .map(|spec| spec.name.clone())
            .collect()
    }
}

//! In-memory alumni store.
//!
//! Records live for the lifetime of the process, in insertion order. The
//! "recent searches" list is the tail of that same order, not a separate
//! collection. Lookups compare the `email` field by exact, case-sensitive
//! equality and the first match wins, so duplicate emails are tolerated.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::alumni::profile::AlumniProfile;
use crate::error::StoreError;

/// Number of records exposed by the recent-searches view.
pub const RECENT_LIMIT: usize = 5;

/// A stored alumni record.
///
/// Starts out as a generated [`AlumniProfile`] but accepts arbitrary extra
/// or overwritten fields through [`AlumniRecord::merge`], so it is kept as
/// an open JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlumniRecord(Map<String, Value>);

impl AlumniRecord {
    /// The record's key. `None` if a merge replaced it with a non-string.
    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Shallow merge: every given key overwrites or adds, unchecked.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        self.0.extend(fields);
    }
}

impl From<AlumniProfile> for AlumniRecord {
    fn from(p: AlumniProfile) -> Self {
        let mut map = Map::new();
        map.insert("email".into(), Value::String(p.email));
        map.insert("name".into(), Value::String(p.name));
        map.insert("familyName".into(), Value::String(p.family_name));
        map.insert("linkedin".into(), Value::String(p.linkedin));
        map.insert("facebook".into(), Value::String(p.facebook));
        map.insert("jobTitle".into(), Value::String(p.job_title));
        map.insert("time".into(), Value::String(p.time));
        Self(map)
    }
}

/// Process-lifetime collection of generated alumni records.
///
/// Each operation takes the lock once; there is no isolation across
/// operations, so concurrent writers simply interleave.
#[derive(Debug, Default)]
pub struct AlumniStore {
    records: RwLock<Vec<AlumniRecord>>,
}

impl AlumniStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave the Vec half-updated, so a poisoned
    // lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Vec<AlumniRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AlumniRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, record: AlumniRecord) {
        self.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Every record, in insertion order.
    pub fn list_all(&self) -> Vec<AlumniRecord> {
        self.read().clone()
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> Vec<AlumniRecord> {
        let records = self.read();
        let start = records.len().saturating_sub(n);
        records[start..].to_vec()
    }

    fn position(records: &[AlumniRecord], email: &str) -> Option<usize> {
        records.iter().position(|r| r.email() == Some(email))
    }

    fn not_found(email: &str) -> StoreError {
        StoreError::NotFound {
            email: email.to_string(),
        }
    }

    /// First record whose email equals `email`.
    pub fn get(&self, email: &str) -> Result<AlumniRecord, StoreError> {
        let records = self.read();
        Self::position(&records, email)
            .map(|i| records[i].clone())
            .ok_or_else(|| Self::not_found(email))
    }

    /// Merge `fields` into the first matching record and return it.
    pub fn update(
        &self,
        email: &str,
        fields: Map<String, Value>,
    ) -> Result<AlumniRecord, StoreError> {
        let mut records = self.write();
        let i = Self::position(&records, email).ok_or_else(|| Self::not_found(email))?;
        records[i].merge(fields);
        Ok(records[i].clone())
    }

    /// Remove and return the first matching record.
    pub fn delete(&self, email: &str) -> Result<AlumniRecord, StoreError> {
        let mut records = self.write();
        let i = Self::position(&records, email).ok_or_else(|| Self::not_found(email))?;
        Ok(records.remove(i))
    }

    /// Remove every record whose email is in `emails`. Returns how many went.
    pub fn delete_many(&self, emails: &[String]) -> usize {
        let mut records = self.write();
        let before = records.len();
        records.retain(|r| !r.email().is_some_and(|e| emails.iter().any(|x| x == e)));
        before - records.len()
    }
}

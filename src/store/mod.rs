//! Owned, in-memory record lists.
//!
//! A `Store` holds one list of records of a single kind (clients, expenses or invoices) along
//! with the counter used to hand out identifiers. Records keep their insertion order, which is
//! the order every query returns them in.

mod aggregate;
mod filter;

pub use aggregate::{average, count_where, percentage, ratio, sum, sum_where};
pub use filter::{Choice, Filter, Searchable};

use crate::Result;
use anyhow::bail;
use std::collections::HashSet;
use std::fmt::Debug;
use tracing::{debug, trace};

/// Describes how a numeric identifier is written, e.g. `CLI-004` or `4`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IdFormat {
    prefix: &'static str,
    width: usize,
}

impl IdFormat {
    pub const fn new(prefix: &'static str, width: usize) -> Self {
        Self { prefix, width }
    }

    pub fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }

    /// Returns the numeric part of `id` if it was written in this format.
    pub fn parse(&self, id: &str) -> Option<u64> {
        id.strip_prefix(self.prefix)?.parse().ok()
    }
}

/// A row that can be held in a `Store`.
pub trait Record: Clone + Debug {
    /// How newly created identifiers are written.
    const ID_FORMAT: IdFormat;

    /// A singular noun for messages, e.g. "invoice".
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: impl Into<String>);
}

/// An owned list of records with create, update, delete and query operations.
///
/// Identifiers come from a counter that starts one past the largest numeric identifier in the
/// seed data and only ever moves forward, so an identifier freed by `delete` is never handed out
/// again.
#[derive(Debug, Clone, PartialEq)]
pub struct Store<R> {
    records: Vec<R>,
    next_id: u64,
}

impl<R> Store<R>
where
    R: Record,
{
    /// Takes ownership of the seed records.
    ///
    /// # Errors
    /// - Returns an error if two seed records share an identifier.
    /// - Returns an error if the largest seed identifier leaves no room for a new one.
    pub fn new(seed: Vec<R>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &seed {
            if !seen.insert(record.id()) {
                bail!("Duplicate {} id '{}' in seed data", R::KIND, record.id());
            }
        }
        let max = seed
            .iter()
            .filter_map(|r| R::ID_FORMAT.parse(r.id()))
            .max()
            .unwrap_or(0);
        let Some(next_id) = max.checked_add(1) else {
            bail!("The {} id '{}' in seed data is too large", R::KIND, max);
        };
        trace!("Seeded {} {} records", seed.len(), R::KIND);
        Ok(Self {
            records: seed,
            next_id,
        })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends `record` under a freshly generated identifier and returns that identifier. Any
    /// identifier already on `record` is replaced.
    ///
    /// # Errors
    /// - Returns an error if the identifier counter is exhausted.
    pub fn create(&mut self, mut record: R) -> Result<String> {
        let id = loop {
            let candidate = R::ID_FORMAT.format(self.next_id);
            let Some(next_id) = self.next_id.checked_add(1) else {
                bail!("Ran out of {} ids at '{candidate}'", R::KIND);
            };
            self.next_id = next_id;
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        record.set_id(id.clone());
        self.records.push(record);
        debug!("Created {} '{id}'", R::KIND);
        Ok(id)
    }

    /// Replaces the record with identifier `id` by `record`, keeping its position. The stored
    /// record always carries `id`, whatever identifier `record` had.
    ///
    /// # Errors
    /// - Returns an error if no record has identifier `id`.
    pub fn update(&mut self, id: &str, mut record: R) -> Result<&R> {
        let ix = self.position(id)?;
        record.set_id(id);
        self.records[ix] = record;
        debug!("Updated {} '{id}'", R::KIND);
        Ok(&self.records[ix])
    }

    /// Applies `change` to a copy of the record with identifier `id` and stores the copy only if
    /// `change` succeeds.
    ///
    /// # Errors
    /// - Returns an error if no record has identifier `id`.
    /// - Returns the error from `change`, in which case the store is unchanged.
    pub fn modify<F>(&mut self, id: &str, change: F) -> Result<&R>
    where
        F: FnOnce(&mut R) -> Result<()>,
    {
        let ix = self.position(id)?;
        let mut record = self.records[ix].clone();
        change(&mut record)?;
        self.update(id, record)
    }

    /// Removes the record with identifier `id`. Returns `false`, and leaves the list untouched,
    /// when there is no such record.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let deleted = self.records.len() < before;
        if deleted {
            debug!("Deleted {} '{id}'", R::KIND);
        } else {
            debug!("No {} '{id}' to delete", R::KIND);
        }
        deleted
    }

    /// Returns the records that pass `filter`, in list order.
    pub fn query<'a>(&'a self, filter: &Filter<R::Facet>) -> Vec<&'a R>
    where
        R: Searchable,
    {
        filter.apply(&self.records)
    }

    fn position(&self, id: &str) -> Result<usize> {
        match self.records.iter().position(|r| r.id() == id) {
            Some(ix) => Ok(ix),
            None => bail!("No {} with id '{id}'", R::KIND),
        }
    }
}

// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Fixed-capacity hash table with configurable hashing and collision resolution.
//!
//! Keys are `i64`, values are strings. The number of buckets is fixed when the table is
//! built; there is no resizing and no removal.
//!
//! # Usage
//!
//! ```rust
//! use hashlab::hash::HashFunctionType;
//! use hashlab::table::CollisionResolution;
//! use hashlab::table::HashTable;
//!
//! let mut table =
//!     HashTable::new(7, CollisionResolution::Chaining, HashFunctionType::Modulo, None).unwrap();
//! table.insert(3, "a").unwrap();
//! table.insert(10, "b").unwrap();
//! table.insert(17, "c").unwrap();
//!
//! let bucket = table.display().bucket(3).unwrap();
//! assert_eq!(bucket.keys(), vec![17, 10, 3]);
//! assert_eq!(table.collision_count(), 2);
//! ```
//!
//! # Duplicate keys
//!
//! Chaining prepends unconditionally, so inserting a key twice stores two entries.
//! Open addressing stops probing at a slot holding the same key and replaces its value;
//! the table length does not change.
//!
//! # Failed inserts
//!
//! An insert either places its entry and updates the counters, or fails and leaves the
//! table untouched. Open-addressing probes stop after `size` slots with
//! [`ErrorKind::TableFull`](crate::error::ErrorKind::TableFull).

mod builder;
mod entry;
mod report;
mod resolver;
mod snapshot;

use std::collections::VecDeque;

use tracing::Level;

pub use self::builder::DEFAULT_SIZE;
pub use self::builder::HashTableBuilder;
pub use self::entry::Entry;
pub use self::report::Metrics;
pub use self::report::NoopReporter;
pub use self::report::Reporter;
pub use self::report::TracingReporter;
pub use self::resolver::CollisionResolution;
pub use self::snapshot::Bucket;
pub use self::snapshot::Snapshot;

use self::resolver::Probing;
use self::resolver::find_slot;
use crate::common::XorShift64;
use crate::error::Error;
use crate::expression::Expression;
use crate::hash::HashFunctionType;
use crate::hash::HashStrategy;

#[derive(Debug, Clone)]
pub(crate) enum Storage {
    Chained(Vec<VecDeque<Entry>>),
    Open {
        slots: Vec<Option<Entry>>,
        probing: Probing,
    },
}

/// A hash table with integer keys and string values.
///
/// Use [`HashTable::new`] or [`HashTable::builder`] to construct instances.
#[derive(Debug)]
pub struct HashTable<R = TracingReporter> {
    hash: HashStrategy,
    collision_resolution: CollisionResolution,
    storage: Storage,
    rng: XorShift64,
    len: usize,
    collisions: u64,
    reporter: R,
}

impl HashTable {
    /// Creates a table of `size` buckets reporting through a [`TracingReporter`].
    ///
    /// `custom_expression` is required when `hash_function` is
    /// [`HashFunctionType::Custom`] and ignored otherwise.
    ///
    /// # Errors
    ///
    /// See [`HashTableBuilder::build`].
    pub fn new(
        size: usize,
        collision_resolution: CollisionResolution,
        hash_function: HashFunctionType,
        custom_expression: Option<&str>,
    ) -> Result<Self, Error> {
        let mut builder = Self::builder()
            .size(size)
            .collision_resolution(collision_resolution)
            .hash_function(hash_function);
        if let Some(expression) = custom_expression {
            builder = builder.custom_expression(expression);
        }
        builder.build()
    }

    /// Returns a builder for creating a table.
    pub fn builder() -> HashTableBuilder {
        HashTableBuilder::default()
    }
}

impl<R: Reporter> HashTable<R> {
    /// Inserts `value` under `key` and reports the new metrics and contents.
    ///
    /// Under chaining the entry is prepended to its bucket and always counts as a new
    /// element; a collision is counted when the bucket was already non-empty. Under open
    /// addressing one collision is counted per slot passed that holds a different key, and
    /// a slot already holding `key` has its value replaced without counting a new element.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::InvalidExpression`](crate::error::ErrorKind::InvalidExpression) if the
    ///   custom hash expression cannot be evaluated for `key`.
    /// * [`ErrorKind::InvalidKey`](crate::error::ErrorKind::InvalidKey) if `key` maps to a
    ///   negative bucket or double-hashing step.
    /// * [`ErrorKind::TableFull`](crate::error::ErrorKind::TableFull) if `size` probes find
    ///   neither a free slot nor `key`.
    ///
    /// On error nothing is stored, counted or reported.
    pub fn insert(&mut self, key: i64, value: impl Into<String>) -> Result<(), Error> {
        self.place(key, value.into()).inspect_err(|err| {
            tracing::event!(Level::WARN, key, %err, "insert rejected");
        })?;

        let metrics = self.metrics();
        self.reporter.report(&metrics, &Snapshot::new(&self.storage));
        Ok(())
    }

    fn place(&mut self, key: i64, value: String) -> Result<(), Error> {
        let size = self.size();
        let home = self.hash.hash(key, &mut self.rng)?;
        match &mut self.storage {
            Storage::Chained(buckets) => {
                let bucket = &mut buckets[home];
                bucket.push_front(Entry::new(key, value));
                self.len += 1;
                if bucket.len() > 1 {
                    tracing::trace!(key, index = home, "chain collision");
                    self.collisions += 1;
                }
            }
            Storage::Open { slots, probing } => {
                let probe = probing.sequence(key, home, size);
                let placement = find_slot(slots, key, probe)?;
                self.collisions += placement.collisions;
                let slot = &mut slots[placement.index];
                if let Some(existing) = slot.as_mut() {
                    existing.set_value(value);
                } else {
                    *slot = Some(Entry::new(key, value));
                    self.len += 1;
                }
            }
        }
        Ok(())
    }

    /// Returns a view of all buckets in index order.
    pub fn display(&self) -> Snapshot<'_> {
        Snapshot::new(&self.storage)
    }

    /// Returns the current occupancy figures.
    pub fn metrics(&self) -> Metrics {
        Metrics::new(self.len, self.size(), self.collisions)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entry has been stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, fixed at construction.
    pub fn size(&self) -> usize {
        self.hash.size()
    }

    /// Collisions observed by successful inserts so far.
    pub fn collision_count(&self) -> u64 {
        self.collisions
    }

    /// `len / size`.
    pub fn load_factor(&self) -> f64 {
        self.metrics().load_factor()
    }

    pub fn collision_resolution(&self) -> CollisionResolution {
        self.collision_resolution
    }

    pub fn hash_function_type(&self) -> HashFunctionType {
        self.hash.function_type()
    }

    /// The custom hash expression, if the table hashes with one.
    pub fn custom_expression(&self) -> Option<&Expression> {
        self.hash.expression()
    }

    /// Returns the reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

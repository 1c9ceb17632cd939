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

use std::fmt;

use crate::table::Entry;
use crate::table::Storage;

/// Read-only view of a table's buckets in index order.
///
/// Chained buckets list their entries newest first. An open-addressing slot holds at most
/// one entry.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    storage: &'a Storage,
}

/// The entries of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    index: usize,
    entries: Vec<&'a Entry>,
}

impl<'a> Bucket<'a> {
    /// Index of the bucket.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Entries of the bucket, newest first.
    pub fn entries(&self) -> &[&'a Entry] {
        &self.entries
    }

    /// Keys of the bucket, newest first.
    pub fn keys(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        match self.storage {
            Storage::Chained(buckets) => buckets.len(),
            Storage::Open { slots, .. } => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bucket at `index`, or `None` if out of range.
    pub fn bucket(&self, index: usize) -> Option<Bucket<'a>> {
        let entries = match self.storage {
            Storage::Chained(buckets) => buckets.get(index)?.iter().collect(),
            Storage::Open { slots, .. } => slots.get(index)?.iter().collect(),
        };
        Some(Bucket { index, entries })
    }

    /// Iterates over all buckets in index order.
    pub fn iter(&self) -> impl Iterator<Item = Bucket<'a>> + '_ {
        (0..self.len()).filter_map(|index| self.bucket(index))
    }

    /// Iterates over all stored entries in bucket order.
    pub fn entries(&self) -> impl Iterator<Item = &'a Entry> + '_ {
        let storage = self.storage;
        let (chained, open) = match storage {
            Storage::Chained(buckets) => (Some(buckets.iter().flatten()), None),
            Storage::Open { slots, .. } => (None, Some(slots.iter().flatten())),
        };
        chained
            .into_iter()
            .flatten()
            .chain(open.into_iter().flatten())
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.storage {
            Storage::Chained(buckets) => {
                for (index, bucket) in buckets.iter().enumerate() {
                    write!(f, "Bucket {index}: ")?;
                    for entry in bucket {
                        write!(f, "{entry} -> ")?;
                    }
                    writeln!(f, "null")?;
                }
            }
            Storage::Open { slots, .. } => {
                for (index, slot) in slots.iter().enumerate() {
                    match slot {
                        Some(entry) => writeln!(f, "Bucket {index}: {entry}")?,
                        None => writeln!(f, "Bucket {index}: Empty")?,
                    }
                }
            }
        }
        Ok(())
    }
}

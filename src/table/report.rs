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

use tracing::Level;

use crate::table::Snapshot;

/// Occupancy figures of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    len: usize,
    size: usize,
    collisions: u64,
}

impl Metrics {
    pub(crate) fn new(len: usize, size: usize, collisions: u64) -> Self {
        Self {
            len,
            size,
            collisions,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Collisions observed so far.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// `len / size`. Can exceed 1 under chaining.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.size as f64
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Load Factor: {}, Collisions so far: {}",
            self.load_factor(),
            self.collisions
        )
    }
}

/// Receives the state of a table after every successful insert.
pub trait Reporter {
    /// Called once per successful insert, after storage and counters are updated.
    fn report(&mut self, metrics: &Metrics, snapshot: &Snapshot<'_>);
}

/// Emits metrics as `tracing` events at INFO and the table contents at DEBUG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, metrics: &Metrics, snapshot: &Snapshot<'_>) {
        tracing::event!(
            Level::INFO,
            load_factor = metrics.load_factor(),
            collisions = metrics.collisions(),
            len = metrics.len(),
            size = metrics.size(),
            "inserted"
        );
        tracing::event!(Level::DEBUG, "current state of the hash table:\n{snapshot}");
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _: &Metrics, _: &Snapshot<'_>) {}
}

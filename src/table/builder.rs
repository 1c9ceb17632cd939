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

use std::collections::VecDeque;

use tracing::Level;

use crate::common::XorShift64;
use crate::error::Error;
use crate::expression::Expression;
use crate::hash::HashFunctionType;
use crate::hash::HashStrategy;
use crate::table::CollisionResolution;
use crate::table::HashTable;
use crate::table::Reporter;
use crate::table::Storage;
use crate::table::TracingReporter;
use crate::table::resolver::Probing;

/// Default number of buckets.
pub const DEFAULT_SIZE: usize = 11;

/// Builder for [`HashTable`].
///
/// Defaults to [`DEFAULT_SIZE`] buckets, chaining, modulo hashing, a clock-seeded random
/// source and a [`TracingReporter`].
///
/// # Examples
///
/// ```
/// use hashlab::hash::HashFunctionType;
/// use hashlab::table::CollisionResolution;
/// use hashlab::table::HashTable;
///
/// let table = HashTable::builder()
///     .size(13)
///     .collision_resolution(CollisionResolution::DoubleHashing)
///     .hash_function(HashFunctionType::Custom)
///     .custom_expression("x * 7 + 3")
///     .build()
///     .unwrap();
/// assert_eq!(table.size(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct HashTableBuilder<R = TracingReporter> {
    size: usize,
    collision_resolution: CollisionResolution,
    hash_function: HashFunctionType,
    custom_expression: Option<String>,
    seed: Option<u64>,
    reporter: R,
}

impl Default for HashTableBuilder {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            collision_resolution: CollisionResolution::Chaining,
            hash_function: HashFunctionType::Modulo,
            custom_expression: None,
            seed: None,
            reporter: TracingReporter,
        }
    }
}

impl<R: Reporter> HashTableBuilder<R> {
    /// Set the fixed number of buckets.
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the collision resolution strategy.
    pub fn collision_resolution(mut self, collision_resolution: CollisionResolution) -> Self {
        self.collision_resolution = collision_resolution;
        self
    }

    /// Set the primary hash function type.
    pub fn hash_function(mut self, hash_function: HashFunctionType) -> Self {
        self.hash_function = hash_function;
        self
    }

    /// Set the expression used by [`HashFunctionType::Custom`]. Ignored by other types.
    pub fn custom_expression(mut self, expression: impl Into<String>) -> Self {
        self.custom_expression = Some(expression.into());
        self
    }

    /// Seed the random source drawn from by universal hashing.
    ///
    /// Two tables built with the same seed and fed the same keys place them identically.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the collaborator receiving metrics after every insert.
    pub fn reporter<R2: Reporter>(self, reporter: R2) -> HashTableBuilder<R2> {
        HashTableBuilder {
            size: self.size,
            collision_resolution: self.collision_resolution,
            hash_function: self.hash_function,
            custom_expression: self.custom_expression,
            seed: self.seed,
            reporter,
        }
    }

    /// Build the table, allocating all of its buckets.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if the
    /// size is 0 or exceeds `i32::MAX`, if a custom hash function has no expression, or if
    /// universal hashing or double hashing is combined with a single bucket.
    pub fn build(self) -> Result<HashTable<R>, Error> {
        let expression = match self.hash_function {
            HashFunctionType::Custom => self.custom_expression.map(Expression::new),
            _ => None,
        };
        let hash = HashStrategy::new(self.hash_function, self.size, expression)?;
        let storage = match Probing::for_resolution(self.collision_resolution, self.size)? {
            None => Storage::Chained(vec![VecDeque::new(); self.size]),
            Some(probing) => Storage::Open {
                slots: vec![None; self.size],
                probing,
            },
        };
        let rng = self.seed.map(XorShift64::seeded).unwrap_or_default();

        tracing::event!(
            Level::DEBUG,
            size = self.size,
            collision_resolution = %self.collision_resolution,
            hash_function = %self.hash_function,
            "created hash table"
        );

        Ok(HashTable {
            hash,
            collision_resolution: self.collision_resolution,
            storage,
            rng,
            len: 0,
            collisions: 0,
            reporter: self.reporter,
        })
    }
}

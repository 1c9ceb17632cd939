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
use std::str::FromStr;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::SecondaryHash;
use crate::table::Entry;

/// How a table resolves two keys landing in the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionResolution {
    /// Each bucket holds a list of entries, newest first.
    Chaining,
    /// Probe `index + 1, index + 2, ...`.
    LinearProbing,
    /// Probe `index + 1, index + 1 + 4, index + 1 + 4 + 9, ...`.
    QuadraticProbing,
    /// Probe `index + step, index + 2 * step, ...` with the step from a [`SecondaryHash`].
    DoubleHashing,
}

impl CollisionResolution {
    /// Every strategy, in menu order.
    pub const ALL: [CollisionResolution; 4] = [
        CollisionResolution::Chaining,
        CollisionResolution::LinearProbing,
        CollisionResolution::QuadraticProbing,
        CollisionResolution::DoubleHashing,
    ];

    /// Convert this collision resolution into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            CollisionResolution::Chaining => "chaining",
            CollisionResolution::LinearProbing => "linear-probing",
            CollisionResolution::QuadraticProbing => "quadratic-probing",
            CollisionResolution::DoubleHashing => "double-hashing",
        }
    }
}

impl fmt::Display for CollisionResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// Menu numbering: 1 chaining, 2 linear, 3 quadratic, 4 double hashing.
impl TryFrom<u8> for CollisionResolution {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CollisionResolution::Chaining),
            2 => Ok(CollisionResolution::LinearProbing),
            3 => Ok(CollisionResolution::QuadraticProbing),
            4 => Ok(CollisionResolution::DoubleHashing),
            _ => Err(Error::config_invalid("unknown collision resolution")
                .with_context("choice", value)),
        }
    }
}

/// Accepts the names produced by `Display`, ignoring case and `-`, `_` or space separators.
impl FromStr for CollisionResolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn normalize(s: &str) -> String {
            s.chars()
                .filter(|c| !matches!(c, '-' | '_' | ' '))
                .map(|c| c.to_ascii_lowercase())
                .collect()
        }
        let wanted = normalize(s);
        CollisionResolution::ALL
            .into_iter()
            .find(|r| normalize(r.into_static()) == wanted)
            .ok_or_else(|| {
                Error::config_invalid("unknown collision resolution").with_context("name", s)
            })
    }
}

/// Probe advance of an open-addressing table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Probing {
    Linear,
    Quadratic,
    Double(SecondaryHash),
}

impl Probing {
    pub(crate) fn for_resolution(
        resolution: CollisionResolution,
        size: usize,
    ) -> Result<Option<Self>, Error> {
        Ok(match resolution {
            CollisionResolution::Chaining => None,
            CollisionResolution::LinearProbing => Some(Probing::Linear),
            CollisionResolution::QuadraticProbing => Some(Probing::Quadratic),
            CollisionResolution::DoubleHashing => Some(Probing::Double(SecondaryHash::new(size)?)),
        })
    }

    /// Returns the probe sequence of `key` starting from its home bucket.
    ///
    /// The double-hashing step is only computed once the sequence moves past `home`.
    pub(crate) fn sequence(&self, key: i64, home: usize, size: usize) -> ProbeSequence {
        let advance = match self {
            Probing::Linear => Advance::Linear,
            Probing::Quadratic => Advance::Quadratic,
            Probing::Double(secondary) => Advance::Double {
                secondary: *secondary,
                key,
                step: None,
            },
        };
        ProbeSequence {
            index: home as u64,
            size: size as u64,
            attempt: 0,
            advance,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Advance {
    Linear,
    Quadratic,
    Double {
        secondary: SecondaryHash,
        key: i64,
        step: Option<u64>,
    },
}

/// Indexes visited while looking for a slot, at most `size` of them.
///
/// The bound turns a full table, or a cycle that never reaches a free slot, into an
/// exhausted sequence rather than an endless loop.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSequence {
    index: u64,
    size: u64,
    attempt: u64,
    advance: Advance,
}

impl ProbeSequence {
    /// Returns the next index to examine, or `None` once `size` indexes were visited.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidKey`] if leaving the home bucket needs a double-hashing
    /// step the key cannot produce.
    pub(crate) fn next_index(&mut self) -> Result<Option<usize>, Error> {
        if self.attempt == self.size {
            return Ok(None);
        }
        if self.attempt > 0 {
            let offset = match &mut self.advance {
                Advance::Linear => 1,
                Advance::Quadratic => (self.attempt * self.attempt) % self.size,
                Advance::Double {
                    secondary,
                    key,
                    step,
                } => {
                    let current = match *step {
                        Some(current) => current,
                        None => {
                            let computed = secondary.step(*key)? as u64;
                            *step = Some(computed);
                            computed
                        }
                    };
                    current % self.size
                }
            };
            self.index = (self.index + offset) % self.size;
        }
        self.attempt += 1;
        Ok(Some(self.index as usize))
    }
}

/// Where an open-addressing insert lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub index: usize,
    /// Occupants with a different key passed on the way.
    pub collisions: u64,
}

/// Walks `probe` until a free slot or a slot holding `key` turns up.
pub(crate) fn find_slot(
    slots: &[Option<Entry>],
    key: i64,
    mut probe: ProbeSequence,
) -> Result<Placement, Error> {
    let mut collisions = 0;
    let mut probes = 0u64;
    while let Some(index) = probe.next_index()? {
        probes += 1;
        match &slots[index] {
            Some(occupant) if occupant.key() != key => {
                tracing::trace!(key, index, occupant = occupant.key(), "probe collision");
                collisions += 1;
            }
            _ => return Ok(Placement { index, collisions }),
        }
    }
    Err(
        Error::new(ErrorKind::TableFull, "probe sequence exhausted without a free slot")
            .with_context("key", key)
            .with_context("probes", probes),
    )
}

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

use crate::common::RandomSource;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::expression::Expression;
use crate::hash::get_prime;

/// Reciprocal of the golden ratio, the multiplier of the multiplication method.
pub const MULTIPLICATION_CONSTANT: f64 = 0.6180339887;

/// The family a table's primary hash function is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunctionType {
    /// `key mod size`.
    Modulo,
    /// `floor(size * frac(key * A))` with `A` = [`MULTIPLICATION_CONSTANT`].
    Multiplication,
    /// `|(a * key + b) mod p| mod size` with `(a, b)` drawn afresh on every call.
    Universal,
    /// A user-supplied [`Expression`] reduced modulo `size`.
    Custom,
}

impl HashFunctionType {
    /// Every hash function type, in menu order.
    pub const ALL: [HashFunctionType; 4] = [
        HashFunctionType::Modulo,
        HashFunctionType::Multiplication,
        HashFunctionType::Universal,
        HashFunctionType::Custom,
    ];

    /// Convert this hash function type into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            HashFunctionType::Modulo => "modulo",
            HashFunctionType::Multiplication => "multiplication",
            HashFunctionType::Universal => "universal",
            HashFunctionType::Custom => "custom",
        }
    }
}

impl fmt::Display for HashFunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// Menu numbering: 1 modulo, 2 multiplication, 3 universal, 4 custom.
impl TryFrom<u8> for HashFunctionType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HashFunctionType::Modulo),
            2 => Ok(HashFunctionType::Multiplication),
            3 => Ok(HashFunctionType::Universal),
            4 => Ok(HashFunctionType::Custom),
            _ => Err(Error::config_invalid("unknown hash function").with_context("choice", value)),
        }
    }
}

impl FromStr for HashFunctionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        HashFunctionType::ALL
            .into_iter()
            .find(|t| t.into_static() == normalized)
            .ok_or_else(|| Error::config_invalid("unknown hash function").with_context("name", s))
    }
}

#[derive(Debug, Clone)]
enum HashFunction {
    Modulo,
    Multiplication,
    Universal { prime: u64 },
    Custom(Expression),
}

/// Maps keys to bucket indexes in `[0, size)`.
///
/// # Examples
///
/// ```
/// use hashlab::common::XorShift64;
/// use hashlab::hash::HashFunctionType;
/// use hashlab::hash::HashStrategy;
///
/// let mut rng = XorShift64::seeded(1);
/// let strategy = HashStrategy::new(HashFunctionType::Modulo, 7, None).unwrap();
/// assert_eq!(strategy.hash(10, &mut rng).unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct HashStrategy {
    function: HashFunction,
    size: usize,
}

impl HashStrategy {
    /// Creates a strategy of the given type for a table of `size` buckets.
    ///
    /// `expression` is only consulted for [`HashFunctionType::Custom`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `size` is 0 or exceeds `i32::MAX`, if a
    /// universal strategy is requested for fewer than 2 buckets, or if a custom strategy is
    /// requested without a non-blank expression.
    pub fn new(
        function_type: HashFunctionType,
        size: usize,
        expression: Option<Expression>,
    ) -> Result<Self, Error> {
        if size == 0 || size > i32::MAX as usize {
            return Err(Error::config_invalid("size must be in [1, i32::MAX]")
                .with_context("size", size));
        }
        let function = match function_type {
            HashFunctionType::Modulo => HashFunction::Modulo,
            HashFunctionType::Multiplication => HashFunction::Multiplication,
            HashFunctionType::Universal => {
                if size < 2 {
                    return Err(Error::config_invalid("universal hashing needs at least 2 buckets")
                        .with_context("size", size));
                }
                HashFunction::Universal {
                    prime: get_prime(2 * size as u64),
                }
            }
            HashFunctionType::Custom => match expression {
                Some(expression) if !expression.as_str().trim().is_empty() => {
                    HashFunction::Custom(expression)
                }
                _ => {
                    return Err(Error::config_invalid(
                        "custom hash function requires an expression",
                    ));
                }
            },
        };
        Ok(Self { function, size })
    }

    /// Returns the number of buckets this strategy hashes into.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the type of this strategy.
    pub fn function_type(&self) -> HashFunctionType {
        match self.function {
            HashFunction::Modulo => HashFunctionType::Modulo,
            HashFunction::Multiplication => HashFunctionType::Multiplication,
            HashFunction::Universal { .. } => HashFunctionType::Universal,
            HashFunction::Custom(_) => HashFunctionType::Custom,
        }
    }

    /// Returns the custom expression, if this is a custom strategy.
    pub fn expression(&self) -> Option<&Expression> {
        match &self.function {
            HashFunction::Custom(expression) => Some(expression),
            _ => None,
        }
    }

    /// Returns the prime modulus of a universal strategy.
    pub fn prime(&self) -> Option<u64> {
        match self.function {
            HashFunction::Universal { prime } => Some(prime),
            _ => None,
        }
    }

    /// Hashes `key` to a bucket index in `[0, size)`.
    ///
    /// `rng` is only drawn from by universal strategies, which pick `a` in `[1, size)` and
    /// `b` in `[0, size)` on every call. The same key can therefore land in different
    /// buckets on different calls.
    ///
    /// Modulo and multiplication keep the sign of the key: `-3 mod 7` is `-3` and the
    /// fractional part of a negative product is negative. Such keys are rejected instead of
    /// being folded into range.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidKey`] if modulo or multiplication hashing yields a
    /// negative index, and [`ErrorKind::InvalidExpression`] if a custom expression cannot be
    /// evaluated for this key.
    pub fn hash<R: RandomSource + ?Sized>(&self, key: i64, rng: &mut R) -> Result<usize, Error> {
        let size = self.size as i64;
        let index = match &self.function {
            HashFunction::Modulo => key % size,
            HashFunction::Multiplication => {
                let frac = (key as f64 * MULTIPLICATION_CONSTANT) % 1.0;
                (size as f64 * frac).floor() as i64
            }
            HashFunction::Universal { prime } => {
                let a = 1 + rng.next_below(self.size as u64 - 1);
                let b = rng.next_below(self.size as u64);
                let p = *prime as i128;
                let folded = ((a as i128 * key as i128 + b as i128) % p).abs();
                (folded % size as i128) as i64
            }
            HashFunction::Custom(expression) => expression.evaluate(key, size)?,
        };
        if index < 0 {
            return Err(Error::new(
                ErrorKind::InvalidKey,
                "key hashes to a negative bucket under truncating remainder",
            )
            .with_context("key", key)
            .with_context("hash_function", self.function_type()));
        }
        Ok(index as usize)
    }
}

/// Step function of double hashing: `1 + (key mod (size - 1))`.
///
/// For non-negative keys the step lies in `[1, size - 1]`. The probe sequence only visits
/// every slot when the step is coprime with `size`, which holds for every step when `size`
/// is prime.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryHash {
    modulus: i64,
}

impl SecondaryHash {
    /// Creates the step function for a table of `size` slots.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `size < 2` or `size > i32::MAX`.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size < 2 || size > i32::MAX as usize {
            return Err(Error::config_invalid("double hashing needs a size in [2, i32::MAX]")
                .with_context("size", size));
        }
        Ok(Self {
            modulus: size as i64 - 1,
        })
    }

    /// Returns the probe step for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidKey`] if the truncating remainder makes the step zero or
    /// negative, which only happens for negative keys.
    pub fn step(&self, key: i64) -> Result<usize, Error> {
        let step = 1 + key % self.modulus;
        if step <= 0 {
            return Err(Error::new(ErrorKind::InvalidKey, "key yields a non-positive probe step")
                .with_context("key", key)
                .with_context("step", step));
        }
        Ok(step as usize)
    }
}

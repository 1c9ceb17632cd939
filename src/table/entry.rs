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

/// A key/value record stored in a bucket or slot.
///
/// The key is fixed at creation; only the value can be replaced, and only by an insert of
/// the same key under open addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: i64,
    value: String,
}

impl Entry {
    pub(crate) fn new(key: i64, value: String) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.key, self.value)
    }
}

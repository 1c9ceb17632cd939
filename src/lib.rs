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

//! A fixed-capacity hash table for experimenting with hash functions and collision
//! resolution strategies.
//!
//! A [`HashTable`](table::HashTable) is configured once with:
//!
//! * a [`CollisionResolution`](table::CollisionResolution): separate chaining, linear
//!   probing, quadratic probing or double hashing;
//! * a [`HashFunctionType`](hash::HashFunctionType): modulo, multiplication, universal or a
//!   custom [`Expression`](expression::Expression) over the key `x`.
//!
//! After every insert the table hands its load factor, collision count and contents to a
//! [`Reporter`](table::Reporter). The default reporter logs through `tracing`.

pub mod common;
pub mod error;
pub mod expression;
pub mod hash;
pub mod table;

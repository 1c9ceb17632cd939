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

//! Hash functions mapping integer keys to bucket indexes.
//!
//! A table uses one [`HashStrategy`] for the home bucket of a key and, under double
//! hashing, a [`SecondaryHash`] for the probe step.

mod function;
mod prime;

pub use self::function::HashFunctionType;
pub use self::function::HashStrategy;
pub use self::function::MULTIPLICATION_CONSTANT;
pub use self::function::SecondaryHash;
pub use self::prime::get_prime;
pub use self::prime::is_prime;

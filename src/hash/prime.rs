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

//! Prime helpers for universal hashing.

/// Returns true if `n` is prime, by trial division up to `sqrt(n)`.
///
/// # Examples
///
/// ```
/// use hashlab::hash::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(97));
/// assert!(!is_prime(1));
/// assert!(!is_prime(91));
/// ```
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i = 2u64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns the smallest prime that is `>= n`.
///
/// # Panics
///
/// Panics if no prime `>= n` fits in a `u64`.
///
/// # Examples
///
/// ```
/// use hashlab::hash::get_prime;
///
/// assert_eq!(get_prime(14), 17);
/// assert_eq!(get_prime(17), 17);
/// assert_eq!(get_prime(0), 2);
/// ```
pub fn get_prime(n: u64) -> u64 {
    let mut candidate = n;
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1).expect("no prime above n fits in u64");
    }
    candidate
}

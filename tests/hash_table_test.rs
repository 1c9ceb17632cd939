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

use hashlab::error::ErrorKind;
use hashlab::hash::HashFunctionType;
use hashlab::table::CollisionResolution;
use hashlab::table::HashTable;
use hashlab::table::Metrics;
use hashlab::table::NoopReporter;
use hashlab::table::Reporter;
use hashlab::table::Snapshot;

const OPEN_ADDRESSING: [CollisionResolution; 3] = [
    CollisionResolution::LinearProbing,
    CollisionResolution::QuadraticProbing,
    CollisionResolution::DoubleHashing,
];

#[derive(Debug, Default)]
struct RecordingReporter {
    metrics: Vec<Metrics>,
    renderings: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, metrics: &Metrics, snapshot: &Snapshot<'_>) {
        self.metrics.push(*metrics);
        self.renderings.push(snapshot.to_string());
    }
}

fn build(
    size: usize,
    resolution: CollisionResolution,
    hash_function: HashFunctionType,
) -> HashTable<RecordingReporter> {
    HashTable::builder()
        .size(size)
        .collision_resolution(resolution)
        .hash_function(hash_function)
        .reporter(RecordingReporter::default())
        .build()
        .unwrap()
}

#[test]
fn test_chaining_prepends_colliding_keys() {
    let mut table = build(7, CollisionResolution::Chaining, HashFunctionType::Modulo);
    table.insert(3, "a").unwrap();
    table.insert(10, "b").unwrap();
    table.insert(17, "c").unwrap();

    let snapshot = table.display();
    let bucket = snapshot.bucket(3).unwrap();
    let entries: Vec<(i64, &str)> = bucket
        .entries()
        .iter()
        .map(|e| (e.key(), e.value()))
        .collect();
    assert_eq!(entries, vec![(17, "c"), (10, "b"), (3, "a")]);
    assert_eq!(table.collision_count(), 2);
    assert_eq!(table.len(), 3);
    for bucket in snapshot.iter().filter(|b| b.index() != 3) {
        assert!(bucket.is_empty());
    }
}

#[test]
fn test_chaining_keeps_duplicate_keys() {
    let mut table = build(5, CollisionResolution::Chaining, HashFunctionType::Modulo);
    table.insert(4, "first").unwrap();
    assert_eq!(table.collision_count(), 0);
    table.insert(4, "second").unwrap();
    table.insert(4, "third").unwrap();

    let bucket = table.display().bucket(4).unwrap();
    assert_eq!(bucket.keys(), vec![4, 4, 4]);
    assert_eq!(bucket.entries()[0].value(), "third");
    assert_eq!(table.len(), 3);
    assert_eq!(table.collision_count(), 2);
}

#[test]
fn test_open_addressing_overwrites_same_key() {
    for resolution in OPEN_ADDRESSING {
        let mut table = build(7, resolution, HashFunctionType::Modulo);
        table.insert(3, "a").unwrap();
        table.insert(10, "b").unwrap();
        let collisions = table.collision_count();
        table.insert(10, "B").unwrap();

        assert_eq!(table.len(), 2, "{resolution}");
        assert_eq!(table.display().entries().count(), 2, "{resolution}");
        let values: Vec<&str> = table
            .display()
            .entries()
            .filter(|e| e.key() == 10)
            .map(|e| e.value())
            .collect();
        assert_eq!(values, vec!["B"], "{resolution}");
        // the second probe for 10 passes the same foreign occupant again
        assert_eq!(table.collision_count(), 2 * collisions, "{resolution}");
    }
}

#[test]
fn test_open_addressing_fills_every_slot() {
    // 11 is prime, so every double-hashing step cycles through all slots
    for resolution in [
        CollisionResolution::LinearProbing,
        CollisionResolution::DoubleHashing,
    ] {
        let mut table = build(11, resolution, HashFunctionType::Modulo);
        for key in 0..11 {
            table.insert(key * 11, format!("v{key}")).unwrap();
        }
        assert_eq!(table.len(), 11);
        assert!(table.display().iter().all(|b| b.len() == 1));
        assert_eq!(table.load_factor(), 1.0);

        let err = table.insert(1000, "overflow").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableFull);
        assert_eq!(table.len(), 11);
    }
}

#[test]
fn test_distinct_keys_fill_table_for_all_open_strategies() {
    for resolution in OPEN_ADDRESSING {
        let mut table = build(8, resolution, HashFunctionType::Modulo);
        for key in 0..8 {
            table.insert(key, "v").unwrap();
        }
        assert_eq!(table.len(), 8);
        assert_eq!(table.collision_count(), 0);
        assert!(table.display().iter().all(|b| b.keys() == vec![b.index() as i64]));
    }
}

#[test]
fn test_linear_probing_collision_count() {
    let mut table = build(7, CollisionResolution::LinearProbing, HashFunctionType::Modulo);
    table.insert(3, "a").unwrap();
    table.insert(10, "b").unwrap();
    table.insert(17, "c").unwrap();

    let snapshot = table.display();
    assert_eq!(snapshot.bucket(3).unwrap().keys(), vec![3]);
    assert_eq!(snapshot.bucket(4).unwrap().keys(), vec![10]);
    assert_eq!(snapshot.bucket(5).unwrap().keys(), vec![17]);
    // 10 passes 3; 17 passes 3 and 10
    assert_eq!(table.collision_count(), 3);
}

#[test]
fn test_quadratic_probing_offsets() {
    let mut table = build(11, CollisionResolution::QuadraticProbing, HashFunctionType::Modulo);
    for key in [2, 13, 24, 35] {
        table.insert(key, "v").unwrap();
    }
    let snapshot = table.display();
    // homes are all 2: 2, then 2+1, then 3+4, then 7+9 = 16 = 5 (mod 11)
    assert_eq!(snapshot.bucket(2).unwrap().keys(), vec![2]);
    assert_eq!(snapshot.bucket(3).unwrap().keys(), vec![13]);
    assert_eq!(snapshot.bucket(7).unwrap().keys(), vec![24]);
    assert_eq!(snapshot.bucket(5).unwrap().keys(), vec![35]);
    assert_eq!(table.collision_count(), 1 + 2 + 3);
}

#[test]
fn test_double_hashing_negative_keys_in_free_home_bucket() {
    let mut table = build(7, CollisionResolution::DoubleHashing, HashFunctionType::Modulo);
    // -7 % 7 = 0 is a valid home, while step(-7) = 1 + (-7 % 6) = 0 is not
    table.insert(-7, "a").unwrap();
    assert_eq!(table.display().bucket(0).unwrap().keys(), vec![-7]);

    // home 0 is taken; step(0) = 1
    table.insert(0, "b").unwrap();
    assert_eq!(table.display().bucket(1).unwrap().keys(), vec![0]);

    // home 0 is taken and step(-14) = 1 + (-14 % 6) = -1
    let before = table.metrics();
    let err = table.insert(-14, "c").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
    assert_eq!(table.metrics(), before);

    let mut table = HashTable::builder()
        .size(7)
        .collision_resolution(CollisionResolution::DoubleHashing)
        .hash_function(HashFunctionType::Universal)
        .seed(3)
        .reporter(NoopReporter)
        .build()
        .unwrap();
    table.insert(-1, "a").unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_reporter_receives_metrics_after_each_insert() {
    let mut table = build(4, CollisionResolution::Chaining, HashFunctionType::Modulo);
    table.insert(1, "a").unwrap();
    table.insert(5, "b").unwrap();
    assert!(table.insert(-1, "c").is_err());

    let reports = &table.reporter().metrics;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].len(), 1);
    assert_eq!(reports[0].load_factor(), 0.25);
    assert_eq!(reports[0].collisions(), 0);
    assert_eq!(reports[1].load_factor(), 0.5);
    assert_eq!(reports[1].collisions(), 1);
    assert_eq!(
        reports[1].to_string(),
        "Load Factor: 0.5, Collisions so far: 1"
    );
}

#[test]
fn test_display_rendering() {
    let mut table = build(3, CollisionResolution::Chaining, HashFunctionType::Modulo);
    table.insert(1, "a").unwrap();
    table.insert(4, "b").unwrap();
    assert_eq!(
        table.reporter().renderings.last().unwrap(),
        "Bucket 0: null\nBucket 1: [4: b] -> [1: a] -> null\nBucket 2: null\n"
    );

    let mut table = build(3, CollisionResolution::LinearProbing, HashFunctionType::Modulo);
    table.insert(1, "a").unwrap();
    assert_eq!(
        table.display().to_string(),
        "Bucket 0: Empty\nBucket 1: [1: a]\nBucket 2: Empty\n"
    );
}

#[test]
fn test_custom_expression_table() {
    let mut table = HashTable::builder()
        .size(10)
        .collision_resolution(CollisionResolution::Chaining)
        .hash_function(HashFunctionType::Custom)
        .custom_expression("x^2 + 5 % 7")
        .reporter(NoopReporter)
        .build()
        .unwrap();
    assert_eq!(table.custom_expression().unwrap().as_str(), "x^2 + 5 % 7");

    // (3^2 + 5) % 7 = 0, (4^2 + 5) % 7 = 0, (5^2 + 5) % 7 = 2
    table.insert(3, "a").unwrap();
    table.insert(4, "b").unwrap();
    table.insert(5, "c").unwrap();
    assert_eq!(table.display().bucket(0).unwrap().keys(), vec![4, 3]);
    assert_eq!(table.display().bucket(2).unwrap().keys(), vec![5]);
}

#[test]
fn test_invalid_expression_surfaces_on_insert() {
    let mut table = HashTable::builder()
        .size(10)
        .hash_function(HashFunctionType::Custom)
        .custom_expression("x + + 1")
        .reporter(NoopReporter)
        .build()
        .unwrap();
    let err = table.insert(3, "a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidExpression);
    assert!(table.is_empty());
    assert_eq!(table.collision_count(), 0);
}

#[test]
fn test_invalid_configuration() {
    let cases = [
        HashTable::new(0, CollisionResolution::Chaining, HashFunctionType::Modulo, None),
        HashTable::new(7, CollisionResolution::Chaining, HashFunctionType::Custom, None),
        HashTable::new(7, CollisionResolution::Chaining, HashFunctionType::Custom, Some("")),
        HashTable::new(1, CollisionResolution::DoubleHashing, HashFunctionType::Modulo, None),
        HashTable::new(1, CollisionResolution::Chaining, HashFunctionType::Universal, None),
    ];
    for result in cases {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ConfigInvalid);
    }

    let table =
        HashTable::new(1, CollisionResolution::LinearProbing, HashFunctionType::Modulo, None)
            .unwrap();
    assert_eq!(table.size(), 1);
}

#[test]
fn test_expression_ignored_for_other_hash_functions() {
    let table = HashTable::new(
        7,
        CollisionResolution::Chaining,
        HashFunctionType::Modulo,
        Some("not an expression"),
    )
    .unwrap();
    assert!(table.custom_expression().is_none());
    assert_eq!(table.hash_function_type(), HashFunctionType::Modulo);
}

#[test]
fn test_enumerants_from_menu_choices() {
    let table = HashTable::new(
        7,
        CollisionResolution::try_from(2).unwrap(),
        HashFunctionType::try_from(2).unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(
        table.collision_resolution(),
        CollisionResolution::LinearProbing
    );
    assert_eq!(
        table.hash_function_type(),
        HashFunctionType::Multiplication
    );
    assert_eq!(
        CollisionResolution::try_from(9).unwrap_err().kind(),
        ErrorKind::ConfigInvalid
    );
}

#[test]
fn test_universal_seeded_tables_agree() {
    let run = |seed| {
        let mut table = HashTable::builder()
            .size(13)
            .collision_resolution(CollisionResolution::Chaining)
            .hash_function(HashFunctionType::Universal)
            .seed(seed)
            .reporter(NoopReporter)
            .build()
            .unwrap();
        for key in -50..50 {
            table.insert(key, "v").unwrap();
        }
        table
            .display()
            .iter()
            .map(|b| b.keys())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn test_universal_spreads_repeated_key() {
    let mut table = HashTable::builder()
        .size(31)
        .hash_function(HashFunctionType::Universal)
        .seed(11)
        .reporter(NoopReporter)
        .build()
        .unwrap();
    for _ in 0..200 {
        table.insert(42, "v").unwrap();
    }
    let used = table.display().iter().filter(|b| !b.is_empty()).count();
    assert!(used > 1, "coefficients are drawn per call, got {used} bucket(s)");
    assert_eq!(table.len(), 200);
}

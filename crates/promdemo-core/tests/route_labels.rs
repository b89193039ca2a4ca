//! Cardinality checks for route labels.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use promdemo_core::{normalize_route, status_class};

#[test]
fn many_dynamic_paths_yield_few_labels() {
    let mut labels = HashSet::new();
    for i in 0..10_000u64 {
        labels.insert(normalize_route(&format!("/api/users/{i}")));
        labels.insert(normalize_route(&format!("/orders/{:08x}-0000-4000-8000-{:012x}/lines/{i}", i, i * 7)));
        labels.insert(normalize_route(&format!("/items/a{:023x}", i * 31)));
    }
    let want: HashSet<String> = ["/api/users/:id", "/orders/:uuid/lines/:id", "/items/:objectid"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(labels, want);
}

#[test]
fn status_classes_are_bounded() {
    let classes: HashSet<String> = (100u16..600).map(status_class).collect();
    assert_eq!(classes.len(), 5);
}

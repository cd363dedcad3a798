// StructuralMap behavior suite.
//
// Ports the original key-by-value scenarios and exercises the container
// invariants:
// - Distinct structures are distinct keys; equal structures are one key.
// - Insert under an equal key overwrites the value, replaces the stored
//   key instance, and never changes the size.
// - Absent-key removal is a non-mutating miss.
// - The three lazy views agree componentwise and each yields exactly
//   `len` elements.
// - Display/Serialize export round-trips to the same element multiset.

use serde::{Deserialize, Serialize};
use structmap::{are_equal, Shape, Structural, StructuralMap};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Structural)]
struct Foo {
    thing: String,
    stuff: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Structural)]
struct Bar {
    kind: String,
}

fn foo(thing: &str, stuff: Option<i32>) -> Foo {
    Foo {
        thing: thing.to_string(),
        stuff,
    }
}

fn bar(kind: &str) -> Bar {
    Bar {
        kind: kind.to_string(),
    }
}

#[test]
fn stores_separate_values_for_unique_keys() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));
    map.insert(foo("hi", Some(0)), bar("qux"));

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&foo("hi", None)), Some(&bar("baz")));
    assert_eq!(map.get(&foo("hi", Some(0))), Some(&bar("qux")));
}

#[test]
fn overwrites_values_for_duplicate_keys() {
    let mut map = StructuralMap::new();
    assert_eq!(map.insert(foo("hi", None), bar("baz")), None);
    assert_eq!(map.insert(foo("hi", None), bar("qux")), Some(bar("baz")));

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&foo("hi", None)), Some(&bar("qux")));
}

#[test]
fn handles_large_maps() {
    let mut map = StructuralMap::new();
    for i in 0..10_000 {
        map.insert(foo(&format!("hi {i}"), None), bar("baz"));
    }
    assert_eq!(map.len(), 10_000);
    assert!(map.contains_key(&foo("hi 0", None)));
    assert!(map.contains_key(&foo("hi 9999", None)));
    assert!(!map.contains_key(&foo("hi 10000", None)));
}

#[test]
fn has_finds_equivalent_keys() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));

    assert!(map.contains_key(&foo("hi", None)));
    assert!(!map.contains_key(&foo("bye", None)));
}

#[test]
fn delete_removes_equivalent_keys() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));

    assert_eq!(map.remove(&foo("hi", None)), Some(bar("baz")));
    assert_eq!(map.len(), 0);
    // Second removal of the same key is a miss with no mutation.
    assert_eq!(map.remove(&foo("hi", None)), None);
    assert_eq!(map.len(), 0);
}

#[test]
fn delete_does_not_remove_differing_keys() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));

    assert_eq!(map.remove(&foo("bye", None)), None);
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&foo("hi", None)));
}

#[test]
fn clear_empties_and_resets_size() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));
    map.insert(foo("bye", None), bar("qux"));
    map.clear();

    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert!(!map.contains_key(&foo("hi", None)));
    assert_eq!(map.entries().count(), 0);

    map.insert(foo("hi", None), bar("baz"));
    assert_eq!(map.len(), 1);
}

// The stored key instance is replaced on overwrite: observable through a
// field the shape deliberately omits.
#[test]
fn overwrite_stores_the_new_key_instance() {
    struct Tagged {
        generation: u32,
        name: String,
    }
    impl Structural for Tagged {
        fn shape(&self) -> Shape<'_> {
            Shape::Composite {
                tag: "Tagged",
                fields: vec![("name", &self.name as &dyn Structural)],
            }
        }
    }

    let mut map = StructuralMap::new();
    map.insert(
        Tagged {
            generation: 1,
            name: "k".to_string(),
        },
        "first",
    );
    map.insert(
        Tagged {
            generation: 2,
            name: "k".to_string(),
        },
        "second",
    );

    assert_eq!(map.len(), 1);
    let stored = map.keys().next().unwrap();
    assert_eq!(stored.generation, 2);
    assert_eq!(map.values().next(), Some(&"second"));
}

#[test]
fn views_yield_len_elements_componentwise() {
    let mut map = StructuralMap::new();
    map.insert(foo("a", None), bar("baz"));
    map.insert(foo("b", Some(1)), bar("qux"));
    map.insert(foo("c", Some(2)), bar("baz"));

    let entries: Vec<_> = map.entries().collect();
    let keys: Vec<_> = map.keys().collect();
    let values: Vec<_> = map.values().collect();
    assert_eq!(entries.len(), map.len());
    assert_eq!(keys.len(), map.len());
    assert_eq!(values.len(), map.len());

    // Same snapshot of an untouched table: the three views line up.
    for ((entry_key, entry_value), (key, value)) in
        entries.iter().zip(keys.iter().zip(values.iter()))
    {
        assert!(are_equal(*entry_key, *key));
        assert_eq!(entry_value, value);
    }

    // Each view is independently restartable by construction.
    assert_eq!(map.keys().count(), 3);
    assert_eq!(map.iter().count(), 3);
    assert_eq!((&map).into_iter().count(), 3);
}

// Lookups accept any Structural probe type whose shape matches.
#[test]
fn lookup_by_structural_probe_type() {
    struct FooProbe<'a> {
        thing: &'a str,
        stuff: Option<i32>,
    }
    impl Structural for FooProbe<'_> {
        fn shape(&self) -> Shape<'_> {
            Shape::Composite {
                tag: "Foo",
                fields: vec![
                    ("thing", &self.thing as &dyn Structural),
                    ("stuff", &self.stuff as &dyn Structural),
                ],
            }
        }
    }

    let mut map = StructuralMap::new();
    map.insert(foo("hi", Some(3)), bar("baz"));

    let probe = FooProbe {
        thing: "hi",
        stuff: Some(3),
    };
    assert_eq!(map.get(&probe), Some(&bar("baz")));
    assert!(map.contains_key(&probe));
}

// Keys of different Rust types coexist behind a boxed trait object.
#[test]
fn heterogeneous_keys_through_boxed_dyn() {
    let mut map: StructuralMap<Box<dyn Structural>, i32> = StructuralMap::new();
    map.insert(Box::new(foo("hi", None)), 1);
    map.insert(Box::new(bar("hi")), 2);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&foo("hi", None)), Some(&1));
    assert_eq!(map.get(&bar("hi")), Some(&2));
}

#[test]
fn from_iterator_deduplicates_structurally() {
    let map: StructuralMap<Foo, Bar> = vec![
        (foo("a", None), bar("one")),
        (foo("b", None), bar("two")),
        (foo("a", None), bar("three")),
    ]
    .into_iter()
    .collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&foo("a", None)), Some(&bar("three")));
}

#[test]
fn json_export_round_trips_the_element_multiset() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));
    map.insert(foo("hello", Some(18)), bar("qux"));
    map.insert(foo("bye", None), bar("baz"));

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(map.to_string(), json);

    let pairs: Vec<(Foo, Bar)> = serde_json::from_str(&json).unwrap();
    assert_eq!(pairs.len(), map.len());

    let rebuilt: StructuralMap<Foo, Bar> = pairs.into_iter().collect();
    assert_eq!(rebuilt.len(), map.len());
    for (key, value) in map.entries() {
        assert_eq!(rebuilt.get(key), Some(value));
    }
}

#[test]
fn debug_renders_a_map_view() {
    let mut map = StructuralMap::new();
    map.insert(foo("hi", None), bar("baz"));
    let rendered = format!("{map:?}");
    assert!(rendered.contains("thing"));
    assert!(rendered.contains("baz"));
}

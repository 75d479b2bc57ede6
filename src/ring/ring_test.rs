use {super::*, crate::hash::FnHasher};

/// Hashes `"<letters><digits>"` into the trailing number, e.g. `"n10"` -> 10.
///
/// Keys without digits land past every virtual node.
fn digits(bytes: &[u8]) -> Position {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| {
            s.trim_start_matches(|c: char| !c.is_ascii_digit())
                .parse()
                .ok()
        })
        .unwrap_or(Position::MAX)
}

fn digits_ring(replicas: usize) -> Ring<String, FnHasher<fn(&[u8]) -> Position>> {
    Ring::with_hasher(replicas, FnHasher::new(digits as fn(&[u8]) -> Position))
}

fn labels<'a, H: RingHasher>(ring: &'a Ring<String, H>) -> Vec<(Position, &'a str)> {
    ring.tokens().map(|(p, n)| (p, n.as_str())).collect()
}

#[test]
fn empty_ring() {
    let ring = Ring::<String>::new(3);
    assert!(ring.is_empty());
    assert_eq!(ring.len(), 0);
    assert_eq!(ring.get("alpha"), None);
    assert_eq!(ring.get(""), None);
}

#[test]
fn clockwise_lookup() {
    let mut ring = digits_ring(1);
    ring.add(["n1", "n2"]); // positions 10 and 20
    assert_eq!(labels(&ring), vec![(10, "n1"), (20, "n2")]);

    assert_eq!(ring.get("k5").map(String::as_str), Some("n1"));
    assert_eq!(ring.get("k10").map(String::as_str), Some("n1"));
    assert_eq!(ring.get("k11").map(String::as_str), Some("n2"));
    assert_eq!(ring.get("k20").map(String::as_str), Some("n2"));
}

#[test]
fn wraparound() {
    let mut ring = digits_ring(2);
    ring.add(["n3", "n1"]); // 30, 31, 10, 11
    assert_eq!(
        labels(&ring),
        vec![(10, "n1"), (11, "n1"), (30, "n3"), (31, "n3")]
    );

    // Past the largest position, the smallest one owns the key.
    assert_eq!(ring.position("k999"), 999);
    assert_eq!(ring.get("k999").map(String::as_str), Some("n1"));
    assert_eq!(ring.get("no digits").map(String::as_str), Some("n1"));
}

#[test]
fn zero_replicas() {
    let mut ring = Ring::<String>::new(0);
    ring.add(["host-1", "host-2"]);
    assert!(ring.is_empty());
    assert_eq!(ring.len(), 0);
    assert_eq!(ring.version(), 0);
    assert_eq!(ring.get("alpha"), None);
}

#[test]
fn collision_last_write_wins() {
    // "a1" + "0" and "b1" + "0" both hash to 10.
    let mut ring = digits_ring(1);
    ring.add(["a1"]);
    ring.add(["b1"]);
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.get("k1").map(String::as_str), Some("b1"));
    assert_eq!(ring.get("k99").map(String::as_str), Some("b1"));

    // Removing the winner hands the position back to the shadowed node.
    ring.remove(&"b1".to_string()).unwrap();
    assert!(ring.contains(&"a1".to_string()));
    assert_eq!(ring.len(), 1);
    assert!(!ring.is_empty());
    assert_eq!(labels(&ring), vec![(10, "a1")]);
    assert_eq!(ring.get("k1").map(String::as_str), Some("a1"));
    assert_eq!(ring.get("k99").map(String::as_str), Some("a1"));

    ring.remove(&"a1".to_string()).unwrap();
    assert!(ring.is_empty());
    assert_eq!(ring.get("k1"), None);
}

#[test]
fn collision_removing_shadowed_node() {
    // Virtual nodes of "a1" collide with those of "b1", "a2" with "b2".
    let mut ring = digits_ring(2);
    ring.add(["a1", "b2"]); // a1: 10, 11; b2: 20, 21
    ring.add(["b1", "a2"]); // b1: 10, 11; a2: 20, 21
    assert_eq!(
        labels(&ring),
        vec![
            (10, "b1"),
            (10, "b1"),
            (11, "b1"),
            (11, "b1"),
            (20, "a2"),
            (20, "a2"),
            (21, "a2"),
            (21, "a2"),
        ]
    );

    // Removing a shadowed node leaves the winner in place.
    ring.remove(&"a1".to_string()).unwrap();
    assert_eq!(
        labels(&ring),
        vec![(10, "b1"), (11, "b1"), (20, "a2"), (20, "a2"), (21, "a2"), (21, "a2")]
    );

    ring.remove(&"a2".to_string()).unwrap();
    assert_eq!(labels(&ring), vec![(10, "b1"), (11, "b1"), (20, "b2"), (21, "b2")]);
    assert_eq!(ring.get("k15").map(String::as_str), Some("b2"));

    // Every node left on the ring is reachable.
    for node in ["b1", "b2"] {
        assert!((0..40).any(|k| ring.get(format!("k{k}")).map(String::as_str) == Some(node)));
    }
    assert_eq!(ring.len(), 2);
}

#[test]
fn duplicate_labels() {
    let mut ring = digits_ring(2);
    ring.add(["n1", "n1"]);
    ring.add(["n2"]);
    assert_eq!(ring.len(), 2);
    assert_eq!(
        labels(&ring),
        vec![(10, "n1"), (10, "n1"), (11, "n1"), (11, "n1"), (20, "n2"), (21, "n2")]
    );
    assert_eq!(ring.get("k11").map(String::as_str), Some("n1"));
    assert_eq!(ring.get("k12").map(String::as_str), Some("n2"));

    // All copies go away on removal.
    ring.remove(&"n1".to_string()).unwrap();
    assert_eq!(labels(&ring), vec![(20, "n2"), (21, "n2")]);
}

#[test]
fn remove() {
    let mut ring = digits_ring(2);
    ring.add(["n1", "n2", "n3"]);
    assert_eq!(ring.version(), 3);

    let removed = ring.remove(&"n2".to_string()).unwrap();
    assert_eq!(removed, "n2");
    assert_eq!(ring.version(), 4);
    assert_eq!(ring.len(), 2);
    assert!(!ring.contains(&"n2".to_string()));
    assert_eq!(
        labels(&ring),
        vec![(10, "n1"), (11, "n1"), (30, "n3"), (31, "n3")]
    );
    assert_eq!(ring.get("k15").map(String::as_str), Some("n3"));

    assert_eq!(
        ring.remove(&"n2".to_string()),
        Err(RingError::UnknownNode("n2".to_string()))
    );
    assert_eq!(ring.version(), 4);

    ring.remove(&"n1".to_string()).unwrap();
    ring.remove(&"n3".to_string()).unwrap();
    assert!(ring.is_empty());
    assert_eq!(ring.get("k15"), None);
}

#[test]
fn positions_stay_sorted() {
    let mut ring = Ring::<String>::new(50);
    ring.add((0..10).map(|i| format!("host-{i}")));
    ring.add(["late"]);
    ring.remove(&"host-3".to_string()).unwrap();

    let positions = ring.tokens().map(|(p, _)| p).collect::<Vec<_>>();
    assert_eq!(positions.len(), 10 * 50);
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn virtual_node_positions() {
    let mut ring = Ring::<String>::new(3);
    ring.add(["host-1"]);

    let mut expected = (0..3)
        .map(|i| crc32fast::hash(format!("host-1{i}").as_bytes()))
        .collect::<Vec<_>>();
    expected.sort_unstable();
    let positions = ring.tokens().map(|(p, _)| p).collect::<Vec<_>>();
    assert_eq!(positions, expected);
}

#[test]
fn debug_output() {
    let mut ring = Ring::<String>::new(4);
    ring.add(["host-1"]);
    assert_eq!(
        format!("{ring:?}"),
        r#"Ring { replicas: 4, nodes: ["host-1"], positions: 4 }"#
    );
}

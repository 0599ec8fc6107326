//! Cross-crate FIB scenarios: names come from `codec::uri_to_name` the way
//! a real forwarder would derive FIB keys from parsed Interest names,
//! exercised only through `Fib`'s public API.

use codec::uri_to_name;
use fib::{origin, Fib};

fn name_wire(uri: &str) -> Vec<u8> {
    uri_to_name(uri).unwrap().to_wire()
}

/// Longest-prefix correctness (Testable Property 3): with entries at
/// `{/a, /a/b, /a/b/c}`, `/a/b/c/d` matches `/a/b/c`, `/a/x` matches `/a`,
/// and a name with no registered ancestor falls back to the default entry
/// iff one exists.
#[test]
fn longest_prefix_lookup_matches_deepest_registered_ancestor() {
    let mut fib = Fib::new();
    for uri in ["ccnx:/a", "ccnx:/a/b", "ccnx:/a/b/c"] {
        let name = uri_to_name(uri).unwrap();
        fib.add_face(&name, 1, origin::STATIC);
    }

    let deep = uri_to_name("ccnx:/a/b/c/d").unwrap();
    let hit = fib.lookup(&deep).expect("should match /a/b/c");
    assert_eq!(hit.key, name_wire("ccnx:/a/b/c"));

    let mid = uri_to_name("ccnx:/a/x").unwrap();
    let hit = fib.lookup(&mid).expect("should match /a");
    assert_eq!(hit.key, name_wire("ccnx:/a"));

    let unrelated = uri_to_name("ccnx:/z").unwrap();
    assert!(fib.lookup(&unrelated).is_none());

    let default = uri_to_name("ccnx:/").unwrap();
    fib.add_face(&default, 99, origin::STATIC);
    let hit = fib.lookup(&unrelated).expect("should now fall back to the default entry");
    assert_eq!(hit.faces.len(), 1);
    assert_eq!(hit.faces[0].face_id, 99);
}

/// Concrete FIB lookup scenario: a single entry at `ccnx:/x/y` with face 7
/// is returned, faces intact, for a query at `ccnx:/x/y/z`.
#[test]
fn fib_lookup_concrete_scenario() {
    let mut fib = Fib::new();
    let key_name = uri_to_name("ccnx:/x/y").unwrap();
    fib.add_face(&key_name, 7, origin::STATIC);

    let query = uri_to_name("ccnx:/x/y/z").unwrap();
    let entry = fib.lookup(&query).expect("longest-prefix match at /x/y");
    assert_eq!(entry.faces.iter().map(|f| f.face_id).collect::<Vec<_>>(), vec![7]);
}

/// Empty-entry GC (Testable Property 4): removing the last face of an
/// entry drops the exact-key lookup to the default (or none), and the
/// entry count decreases by one.
#[test]
fn removing_last_face_collapses_entry_and_shrinks_count() {
    let mut fib = Fib::new();
    let name = uri_to_name("ccnx:/a/b").unwrap();
    fib.add_face(&name, 3, origin::STATIC);
    assert_eq!(fib.len(), 1);

    fib.remove_face(&name, 3, origin::STATIC).unwrap();
    assert_eq!(fib.len(), 0);
    assert!(fib.lookup(&name).is_none());
}

/// FIB cleanup on face close: entry `E` has faces `{3, 5}`; face 3 closing
/// leaves `E` with `{5}`; once face 5 also closes, the next cleanup removes
/// `E` entirely.
#[test]
fn cleanup_drops_closed_faces_then_empties_entry() {
    let mut fib = Fib::new();
    let name = uri_to_name("ccnx:/a/b").unwrap();
    fib.add_face(&name, 3, origin::DYNAMIC);
    fib.add_face(&name, 5, origin::DYNAMIC);

    let mut closed = vec![3u16];
    fib.cleanup_closed_faces(|face_id| closed.contains(&face_id));
    let entry = fib.lookup(&name).expect("entry should survive with face 5 left");
    assert_eq!(entry.faces.iter().map(|f| f.face_id).collect::<Vec<_>>(), vec![5]);

    closed.push(5);
    fib.cleanup_closed_faces(|face_id| closed.contains(&face_id));
    assert!(fib.lookup(&name).is_none());
    assert_eq!(fib.len(), 0);
}

//! The Forwarding Information Base itself (§4.2.1–§4.2.3).

use crate::entry::FibEntry;
use crate::error::{FibError, FibResult};
use std::collections::HashMap;
use types::Name;

/// Sentinel key for the default (empty-name) entry: the wire form of a
/// zero-length `NAME` TLV header (`type=0x0000, length=0x0000`), 4 bytes —
/// distinct from the 0-byte key an empty `Name::to_wire()` would otherwise
/// produce, so a real lookup walk never collides with it (§4.2.1).
const DEFAULT_KEY: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Name-prefix → face-set routing table with segment-boundary longest-prefix
/// lookup. Single-writer, many-reader by contract (§5): this type is plain
/// and non-concurrent, leaving synchronization to the caller.
#[derive(Debug, Default)]
pub struct Fib {
    entries: HashMap<Vec<u8>, FibEntry>,
    default_entry: Option<FibEntry>,
}

/// Finds the largest segment boundary strictly less than `current_l` by
/// re-walking the TLV structure from the start of `wire` (§4.2.2).
fn prev_boundary(wire: &[u8], current_l: usize) -> Option<usize> {
    let mut offset = 0usize;
    while let Ok(next) = codec::next_tlv_boundary(wire, offset) {
        if next < current_l {
            offset = next;
        } else {
            break;
        }
    }
    if offset == 0 {
        None
    } else {
        Some(offset)
    }
}

impl Fib {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.default_entry.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the existing entry for `name` or creates an empty one
    /// (§4.2.3).
    pub fn lookup_or_create(&mut self, name: &Name) -> &mut FibEntry {
        if name.segments.is_empty() {
            self.default_entry
                .get_or_insert_with(|| FibEntry::new(DEFAULT_KEY.to_vec()))
        } else {
            let key = name.to_wire();
            self.entries
                .entry(key.clone())
                .or_insert_with(|| FibEntry::new(key))
        }
    }

    /// Adds `face_id` to `name`'s entry (creating the entry if absent),
    /// ORing `origin` into the face's mask. Returns `true` iff a brand new
    /// entry was created (§4.2.3, §4.2.4's return-indicator bit 0x01).
    pub fn add_face(&mut self, name: &Name, face_id: u16, origin: u8) -> bool {
        if name.segments.is_empty() {
            let created = self.default_entry.is_none();
            self.default_entry
                .get_or_insert_with(|| FibEntry::new(DEFAULT_KEY.to_vec()))
                .add_face(face_id, origin);
            created
        } else {
            let key = name.to_wire();
            let created = !self.entries.contains_key(&key);
            self.entries
                .entry(key.clone())
                .or_insert_with(|| FibEntry::new(key))
                .add_face(face_id, origin);
            created
        }
    }

    /// Clears `origin` bits from `face_id` on `name`'s entry, removing the
    /// record and, if the face set empties, the entry itself. Returns
    /// `true` iff the entry was removed (§4.2.3, §4.2.4's return-indicator
    /// bit 0x02). Fails with [`FibError::NotRegistered`] if no entry
    /// exists for `name`.
    pub fn remove_face(&mut self, name: &Name, face_id: u16, origin: u8) -> FibResult<bool> {
        if name.segments.is_empty() {
            let entry = self.default_entry.as_mut().ok_or(FibError::NotRegistered)?;
            let became_empty = entry.remove_face(face_id, origin);
            if became_empty {
                self.default_entry = None;
            }
            Ok(became_empty)
        } else {
            let key = name.to_wire();
            let entry = self.entries.get_mut(&key).ok_or(FibError::NotRegistered)?;
            let became_empty = entry.remove_face(face_id, origin);
            if became_empty {
                self.entries.remove(&key);
            }
            Ok(became_empty)
        }
    }

    /// Segment-boundary longest-prefix lookup (§4.2.2): tries an exact
    /// match, then repeatedly shortens to the previous segment boundary.
    /// Falls back to the default entry if nothing matches.
    pub fn lookup(&self, name: &Name) -> Option<&FibEntry> {
        let wire = name.to_wire();
        let mut l = wire.len();
        loop {
            if let Some(entry) = self.entries.get(&wire[..l]) {
                return Some(entry);
            }
            match prev_boundary(&wire, l) {
                Some(new_l) => l = new_l,
                None => break,
            }
        }
        self.default_entry.as_ref()
    }

    /// Drops face records reported closed by `is_closed`, removing any
    /// entry (including the default) that becomes empty (§4.2.3).
    pub fn cleanup_closed_faces(&mut self, is_closed: impl Fn(u16) -> bool) {
        self.entries.retain(|_, entry| {
            entry.faces.retain(|f| !is_closed(f.face_id));
            !entry.is_empty()
        });
        if let Some(entry) = &mut self.default_entry {
            entry.faces.retain(|f| !is_closed(f.face_id));
            if entry.is_empty() {
                self.default_entry = None;
            }
        }
    }
}

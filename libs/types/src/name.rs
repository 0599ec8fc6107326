//! Name segment types and the `Name` sequence that is a packet's routing key.

/// Minimum value of the reserved application-component range.
pub const APP_MIN: u16 = 0x1000;
/// Maximum value of the reserved application-component range.
pub const APP_MAX: u16 = 0x1FFF;

/// Named application components from the original registry, kept as
/// documentation of well-known indices; the codec treats every value in
/// `APP_MIN..=APP_MAX` identically (an opaque application segment).
pub const APP_BI_DIRECT: u16 = 0x1400;
pub const APP_MESH: u16 = 0x1401;
pub const APP_FROM_PUB: u16 = 0x1402;
pub const APP_DTC: u16 = 0x1403;

/// Name segment type tag.
///
/// Mirrors the wire registry exactly: a segment is a `(type, length, bytes)`
/// TLV, and only the handful of variants below carry codec-level meaning
/// (`Chunk` is rewritten to/from the `Chunk=<u32>` URI form, `SymbolicCode`
/// segments are inserted ahead of a trailing `Chunk` segment, and so on).
/// Anything in `0x1000..=0x1FFF` is an application component; everything
/// else round-trips as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    /// Generic name segment (`NAMESEGMENT`, `0x0001`).
    NameSegment,
    /// Interest payload id (`IPID`, `0x0002`).
    IpId,
    /// Chunk number, 4-byte big-endian value (`CHUNK`, `0x0010`).
    Chunk,
    /// Chunk metadata (`META`, `0x0011`).
    Meta,
    /// Nonce (`NONCE`, `0x0012`).
    Nonce,
    /// Symbolic code, 8 bytes (`SYMBOLIC_CODE`, `0x0013`).
    SymbolicCode,
    /// Application component, `0x1000..=0x1FFF`, index is `value - APP_MIN`.
    Application(u16),
    /// Any other wire value, preserved opaquely.
    Other(u16),
}

impl SegmentType {
    pub const NAMESEGMENT: u16 = 0x0001;
    pub const IPID: u16 = 0x0002;
    pub const CHUNK: u16 = 0x0010;
    pub const META: u16 = 0x0011;
    pub const NONCE: u16 = 0x0012;
    pub const SYMBOLIC_CODE: u16 = 0x0013;

    /// Decode a raw wire type value.
    pub fn from_wire(value: u16) -> Self {
        match value {
            Self::NAMESEGMENT => Self::NameSegment,
            Self::IPID => Self::IpId,
            Self::CHUNK => Self::Chunk,
            Self::META => Self::Meta,
            Self::NONCE => Self::Nonce,
            Self::SYMBOLIC_CODE => Self::SymbolicCode,
            v if (APP_MIN..=APP_MAX).contains(&v) => Self::Application(v - APP_MIN),
            v => Self::Other(v),
        }
    }

    /// Encode back to the raw wire type value.
    pub fn to_wire(self) -> u16 {
        match self {
            Self::NameSegment => Self::NAMESEGMENT,
            Self::IpId => Self::IPID,
            Self::Chunk => Self::CHUNK,
            Self::Meta => Self::META,
            Self::Nonce => Self::NONCE,
            Self::SymbolicCode => Self::SYMBOLIC_CODE,
            Self::Application(index) => APP_MIN + index,
            Self::Other(v) => v,
        }
    }
}

/// One `(type, length, bytes)` name segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameSegment {
    pub seg_type: SegmentType,
    pub value: Vec<u8>,
}

impl NameSegment {
    pub fn new(seg_type: SegmentType, value: impl Into<Vec<u8>>) -> Self {
        Self {
            seg_type,
            value: value.into(),
        }
    }

    /// Length of this segment's wire form: 2 (type) + 2 (length) + value.
    pub fn wire_len(&self) -> usize {
        4 + self.value.len()
    }
}

/// A borrowed view of one name segment: the value aliases the input buffer
/// instead of being copied, for use by the zero-copy parser (§9 design
/// notes: parsed byte-slice fields borrow from the input buffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSegmentRef<'a> {
    pub seg_type: SegmentType,
    pub value: &'a [u8],
}

impl<'a> NameSegmentRef<'a> {
    pub fn to_owned_segment(&self) -> NameSegment {
        NameSegment::new(self.seg_type, self.value.to_vec())
    }
}

/// Which URI scheme token a name was parsed from (`ccnx:/` or the informal
/// `ccn:/` variant), so that re-rendering through `name_to_uri` can restore
/// the original token rather than silently normalizing it (§4.1.2,
/// Testable Property 1: the round trip only lowercases the scheme, it does
/// not collapse `ccn:/` into `ccnx:/`). Purely a rendering hint — it plays
/// no part in the name's wire form, so it is excluded from `Name`'s
/// equality and hashing (§3: the name's bytes are its identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UriScheme {
    #[default]
    Ccnx,
    Ccn,
}

impl UriScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            UriScheme::Ccnx => "ccnx:",
            UriScheme::Ccn => "ccn:",
        }
    }
}

/// An ordered sequence of name segments. The name's wire-encoded bytes are
/// its identity for hashing and prefix matching (§3 of the spec); `scheme`
/// is carried only for URI round-tripping and does not participate in
/// equality, hashing, or wire encoding.
#[derive(Debug, Clone, Default)]
pub struct Name {
    pub segments: Vec<NameSegment>,
    pub scheme: UriScheme,
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Name {}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl Name {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<NameSegment>) -> Self {
        Self {
            segments,
            scheme: UriScheme::default(),
        }
    }

    /// Build a `Name` tagged with the URI scheme token it was parsed from.
    pub fn with_scheme(segments: Vec<NameSegment>, scheme: UriScheme) -> Self {
        Self { segments, scheme }
    }

    /// Build an owned `Name` from a borrowed parse view.
    pub fn from_refs(refs: &[NameSegmentRef<'_>]) -> Self {
        Self {
            segments: refs.iter().map(NameSegmentRef::to_owned_segment).collect(),
            scheme: UriScheme::default(),
        }
    }

    /// Total length of the concatenated segment wire forms.
    pub fn wire_len(&self) -> usize {
        self.segments.iter().map(NameSegment::wire_len).sum()
    }

    /// Encode to the raw wire form (segment TLVs concatenated, no outer
    /// length header).
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        for seg in &self.segments {
            out.extend_from_slice(&seg.seg_type.to_wire().to_be_bytes());
            out.extend_from_slice(&(seg.value.len() as u16).to_be_bytes());
            out.extend_from_slice(&seg.value);
        }
        out
    }

    /// `true` iff `self` is a segment-boundary-aligned prefix of `other`:
    /// every segment of `self` equals the segment at the same position in
    /// `other`. This is the invariant from §3 — prefix match is never
    /// evaluated at arbitrary byte boundaries.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        if self.segments.len() > other.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(a, b)| a == b)
    }

    /// Return a copy of this name with a trailing `Chunk` segment removed,
    /// together with the chunk number it carried, if any.
    pub fn without_chunk(&self) -> (Name, Option<u32>) {
        match self.segments.last() {
            Some(last) if last.seg_type == SegmentType::Chunk && last.value.len() == 4 => {
                let chunk = u32::from_be_bytes(last.value.clone().try_into().unwrap());
                let mut stripped = self.clone();
                stripped.segments.pop();
                (stripped, Some(chunk))
            }
            _ => (self.clone(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_type_round_trips_application_range() {
        let st = SegmentType::from_wire(APP_BI_DIRECT);
        assert_eq!(st, SegmentType::Application(APP_BI_DIRECT - APP_MIN));
        assert_eq!(st.to_wire(), APP_BI_DIRECT);
    }

    #[test]
    fn segment_type_round_trips_known_values() {
        for &v in &[
            SegmentType::NAMESEGMENT,
            SegmentType::IPID,
            SegmentType::CHUNK,
            SegmentType::META,
            SegmentType::NONCE,
            SegmentType::SYMBOLIC_CODE,
        ] {
            assert_eq!(SegmentType::from_wire(v).to_wire(), v);
        }
    }

    #[test]
    fn prefix_match_is_segment_aligned() {
        let a = Name::from_segments(vec![NameSegment::new(SegmentType::NameSegment, "a")]);
        let ab = Name::from_segments(vec![
            NameSegment::new(SegmentType::NameSegment, "a"),
            NameSegment::new(SegmentType::NameSegment, "b"),
        ]);
        assert!(a.is_prefix_of(&ab));
        assert!(!ab.is_prefix_of(&a));

        // "a" is a byte-prefix of a single segment "ab" but not a
        // segment-boundary prefix, so this must be false.
        let ab_one_segment =
            Name::from_segments(vec![NameSegment::new(SegmentType::NameSegment, "ab")]);
        assert!(!a.is_prefix_of(&ab_one_segment));
    }

    #[test]
    fn without_chunk_strips_trailing_chunk_segment() {
        let name = Name::from_segments(vec![
            NameSegment::new(SegmentType::NameSegment, "a"),
            NameSegment::new(SegmentType::Chunk, 3u32.to_be_bytes().to_vec()),
        ]);
        let (stripped, chunk) = name.without_chunk();
        assert_eq!(chunk, Some(3));
        assert_eq!(stripped.segments.len(), 1);

        let (same, none) = stripped.without_chunk();
        assert_eq!(none, None);
        assert_eq!(same, stripped);
    }
}

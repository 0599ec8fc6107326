//! URI ↔ Name conversion (§4.1.2).
//!
//! Grammar: `ccnx:/<seg>(/<seg>)*` and the informal `ccn:/` variant. Special
//! segment prefixes (`Chunk=`, `META=`, `APP:<index>=`) are rewritten into
//! typed segments; everything else becomes a generic `NAMESEGMENT` with its
//! percent-decoded bytes.

use crate::error::{CodecError, CodecResult};
use types::name::{APP_MAX, APP_MIN};
use types::{Name, NameSegment, SegmentType, UriScheme};

const CHUNK_PREFIX: &str = "Chunk=";
const META_PREFIX: &str = "META=";
const APP_PREFIX: &str = "APP:";

/// Parse a `ccnx:/...` or `ccn:/...` URI into a `Name`. The matched scheme
/// token is recorded on the returned `Name` so [`name_to_uri`] can restore
/// it instead of normalizing every name to `ccnx:` (§4.1.2, Testable
/// Property 1: canonicalization only lowercases the scheme).
pub fn uri_to_name(uri: &str) -> CodecResult<Name> {
    let (scheme, rest) = strip_scheme(uri)?;

    let mut segments = Vec::new();
    for raw_segment in rest.split('/') {
        if raw_segment.is_empty() {
            continue; // collapses a leading "//" and drops empty trailing segments
        }
        segments.push(decode_segment(raw_segment)?);
    }
    Ok(Name::with_scheme(segments, scheme))
}

fn strip_scheme(uri: &str) -> CodecResult<(UriScheme, &str)> {
    for (scheme, prefix) in [(UriScheme::Ccnx, "ccnx:/"), (UriScheme::Ccn, "ccn:/")] {
        if let Some(rest) = uri.strip_prefix(prefix) {
            return Ok((scheme, rest));
        }
    }
    Err(CodecError::invalid_argument(format!(
        "URI must start with \"ccnx:/\" or \"ccn:/\": {uri}"
    )))
}

fn decode_segment(raw: &str) -> CodecResult<NameSegment> {
    if let Some(digits) = raw.strip_prefix(CHUNK_PREFIX) {
        let chunk: u32 = digits
            .parse()
            .map_err(|_| CodecError::invalid_argument(format!("bad chunk number: {digits}")))?;
        return Ok(NameSegment::new(
            SegmentType::Chunk,
            chunk.to_be_bytes().to_vec(),
        ));
    }
    if let Some(bytes) = raw.strip_prefix(META_PREFIX) {
        return Ok(NameSegment::new(SegmentType::Meta, percent_decode(bytes)?));
    }
    if let Some(rest) = raw.strip_prefix(APP_PREFIX) {
        let (index_str, bytes) = rest
            .split_once('=')
            .ok_or_else(|| CodecError::invalid_argument(format!("malformed APP component: {raw}")))?;
        let index: u16 = index_str
            .parse()
            .map_err(|_| CodecError::invalid_argument(format!("bad APP index: {index_str}")))?;
        if index > APP_MAX - APP_MIN {
            return Err(CodecError::invalid_argument(format!(
                "APP index {index} out of range [0, {}]",
                APP_MAX - APP_MIN
            )));
        }
        return Ok(NameSegment::new(
            SegmentType::Application(index),
            percent_decode(bytes)?,
        ));
    }
    Ok(NameSegment::new(
        SegmentType::NameSegment,
        percent_decode(raw)?,
    ))
}

/// Render a `Name` back to its URI form, the inverse of [`uri_to_name`].
/// Uses the scheme token the name was parsed with (`ccnx:` by default for
/// names built outside `uri_to_name`), so the round trip only lowercases
/// the scheme rather than normalizing `ccn:/` into `ccnx:/` (§8, Testable
/// Property 1).
pub fn name_to_uri(name: &Name) -> String {
    let mut uri = String::from(name.scheme.as_str());
    for seg in &name.segments {
        uri.push('/');
        uri.push_str(&encode_segment(seg));
    }
    uri
}

fn encode_segment(seg: &NameSegment) -> String {
    match seg.seg_type {
        SegmentType::Chunk if seg.value.len() == 4 => {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&seg.value);
            format!("{CHUNK_PREFIX}{}", u32::from_be_bytes(bytes))
        }
        SegmentType::Meta => format!("{META_PREFIX}{}", percent_encode(&seg.value)),
        SegmentType::Application(index) => {
            format!("{APP_PREFIX}{index}={}", percent_encode(&seg.value))
        }
        _ => percent_encode(&seg.value),
    }
}

fn percent_decode(s: &str) -> CodecResult<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or_else(|| {
                CodecError::invalid_argument(format!("truncated percent-escape in {s}"))
            })?;
            let hex_str = std::str::from_utf8(hex)
                .map_err(|_| CodecError::invalid_argument(format!("bad percent-escape in {s}")))?;
            let byte = u8::from_str_radix(hex_str, 16)
                .map_err(|_| CodecError::invalid_argument(format!("bad percent-escape in {s}")))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

fn percent_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

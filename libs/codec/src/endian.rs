//! Platform-independent 64-bit byte-order helpers (§4.1.7).
//!
//! Some TLV values (cache time, NTP-64) span 8 bytes; `u64::to_be`/`from_be`
//! already do this, but we give the wire names from the spec so call sites
//! read the way the protocol description does.

/// Host-to-network byte swap for a 64-bit value.
pub fn htonb(value: u64) -> u64 {
    value.to_be()
}

/// Network-to-host byte swap for a 64-bit value.
pub fn ntohb(value: u64) -> u64 {
    u64::from_be(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let v = 0x0102030405060708u64;
        assert_eq!(ntohb(htonb(v)), v);
    }
}

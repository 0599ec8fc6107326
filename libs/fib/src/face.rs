//! The external seam the route-message protocol needs (§4.2.4).
//!
//! The face (link) abstraction itself is out of scope (§1) beyond its
//! integer identity; `libs/fib` ships only the trait a forwarder implements
//! to resolve a `(host, protocol)` pair into a face id, creating a face if
//! one does not already exist for an `Add` operation.

/// Transport used to reach a route's host, decoded from the configuration
/// file (§4.2.5) and the route-message protocol (§4.2.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteProtocol {
    Tcp,
    Udp,
}

impl RouteProtocol {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            _ => None,
        }
    }
}

/// A small integer identifying an outbound face (§3 GLOSSARY).
pub type FaceId = u16;

/// Resolves a `(host, protocol)` pair to a face, creating one if needed for
/// an `Add` operation (§4.2.4). The face module itself is an external
/// collaborator (§1); this trait is the only seam `fib` needs into it.
pub trait FaceResolver {
    fn resolve(&mut self, host: &str, protocol: RouteProtocol) -> FaceId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_tokens_are_case_insensitive() {
        assert_eq!(RouteProtocol::from_token("TCP"), Some(RouteProtocol::Tcp));
        assert_eq!(RouteProtocol::from_token("udp"), Some(RouteProtocol::Udp));
        assert_eq!(RouteProtocol::from_token("sctp"), None);
    }
}

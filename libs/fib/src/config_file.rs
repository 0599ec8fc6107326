//! The whitespace-tokenized route configuration file (§4.2.5, §6).
//!
//! One route per non-comment line: `<uri> <protocol> <host1> <host2> …
//! <hostK>` with `K ≤ 32`. Lines beginning with `#` are comments. A bad
//! line is logged and skipped; the rest of the file still loads (§7: "the
//! module never aborts startup for a bad line").

use crate::face::{FaceResolver, RouteProtocol};
use crate::fib::Fib;
use codec::uri_to_name;
use std::io::BufRead;
use tracing::warn;

/// Maximum hosts accepted on a single configuration line (§4.2.5).
pub const MAX_HOSTS_PER_LINE: usize = 32;

/// Loads routes from a reader over the whitespace config grammar, adding
/// each host's face with [`crate::entry::origin::STATIC`]. Returns the
/// number of lines that were successfully applied.
pub fn load_config<R: BufRead>(
    fib: &mut Fib,
    resolver: &mut impl FaceResolver,
    reader: R,
) -> std::io::Result<usize> {
    let mut applied = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let uri = match tokens.next() {
            Some(u) => u,
            None => continue,
        };
        let protocol_tok = match tokens.next() {
            Some(p) => p,
            None => {
                warn!(line = lineno + 1, "route config line missing protocol token, skipping");
                continue;
            }
        };
        let Some(protocol) = RouteProtocol::from_token(protocol_tok) else {
            warn!(line = lineno + 1, protocol = protocol_tok, "unknown protocol token, skipping line");
            continue;
        };

        let hosts: Vec<&str> = tokens.collect();
        if hosts.is_empty() {
            warn!(line = lineno + 1, uri, "route config line has no hosts, skipping");
            continue;
        }
        if hosts.len() > MAX_HOSTS_PER_LINE {
            warn!(
                line = lineno + 1,
                uri,
                count = hosts.len(),
                "route config line exceeds {MAX_HOSTS_PER_LINE} hosts, skipping"
            );
            continue;
        }

        let name = match uri_to_name(uri) {
            Ok(n) => n,
            Err(e) => {
                warn!(line = lineno + 1, uri, error = %e, "failed to parse route uri, skipping line");
                continue;
            }
        };

        for host in &hosts {
            let face_id = resolver.resolve(host, protocol);
            fib.add_face(&name, face_id, crate::entry::origin::STATIC);
        }
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceId;
    use std::collections::HashMap;
    use std::io::Cursor;

    struct StaticResolver {
        next_id: FaceId,
        assigned: HashMap<String, FaceId>,
    }

    impl StaticResolver {
        fn new() -> Self {
            Self {
                next_id: 1,
                assigned: HashMap::new(),
            }
        }
    }

    impl FaceResolver for StaticResolver {
        fn resolve(&mut self, host: &str, _protocol: RouteProtocol) -> FaceId {
            *self.assigned.entry(host.to_string()).or_insert_with(|| {
                let id = self.next_id;
                self.next_id += 1;
                id
            })
        }
    }

    #[test]
    fn loads_routes_and_skips_comments_and_blank_lines() {
        let text = "# a comment\n\nccnx:/a tcp 10.0.0.1 10.0.0.2\nccnx:/b udp 10.0.0.3\n";
        let mut fib = Fib::new();
        let mut resolver = StaticResolver::new();
        let applied = load_config(&mut fib, &mut resolver, Cursor::new(text)).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(fib.len(), 2);
    }

    #[test]
    fn bad_uri_is_skipped_and_rest_of_file_still_loads() {
        let text = "not-a-uri tcp 10.0.0.1\nccnx:/good tcp 10.0.0.2\n";
        let mut fib = Fib::new();
        let mut resolver = StaticResolver::new();
        let applied = load_config(&mut fib, &mut resolver, Cursor::new(text)).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(fib.len(), 1);
    }

    #[test]
    fn too_many_hosts_is_skipped() {
        let hosts: Vec<String> = (0..40).map(|i| format!("10.0.0.{i}")).collect();
        let text = format!("ccnx:/a tcp {}\n", hosts.join(" "));
        let mut fib = Fib::new();
        let mut resolver = StaticResolver::new();
        let applied = load_config(&mut fib, &mut resolver, Cursor::new(text.as_bytes())).unwrap();
        assert_eq!(applied, 0);
        assert_eq!(fib.len(), 0);
    }
}

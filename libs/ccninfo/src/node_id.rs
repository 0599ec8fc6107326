//! Local node identifier selection (§4.3.1): "IPv4 if any non-loopback
//! interface has one, else IPv6, else `127.0.0.1`".

use std::net::{Ipv4Addr, Ipv6Addr};
use types::NodeId;

/// Picks this host's node identifier by walking the local network
/// interfaces. Falls back to `127.0.0.1` if nothing suitable is found or
/// interface enumeration is unavailable on this platform.
pub fn local_node_id() -> NodeId {
    let (v4, v6) = scan_interfaces();
    if let Some(addr) = v4 {
        NodeId::V4(addr)
    } else if let Some(addr) = v6 {
        NodeId::V6(addr)
    } else {
        NodeId::V4(Ipv4Addr::LOCALHOST)
    }
}

#[cfg(unix)]
fn scan_interfaces() -> (Option<Ipv4Addr>, Option<Ipv6Addr>) {
    use std::ptr;

    let mut head: *mut libc::ifaddrs = ptr::null_mut();
    // SAFETY: `head` is a valid out-pointer; `getifaddrs` populates it with
    // a linked list we own and must free with `freeifaddrs`.
    if unsafe { libc::getifaddrs(&mut head) } != 0 || head.is_null() {
        return (None, None);
    }

    let mut v4 = None;
    let mut v6 = None;
    let mut cur = head;
    // SAFETY: each node in the list was populated by `getifaddrs` and is
    // valid until `freeifaddrs` below; we only read through it.
    unsafe {
        while !cur.is_null() {
            let entry = &*cur;
            let is_loopback = entry.ifa_flags as i32 & libc::IFF_LOOPBACK != 0;
            if !is_loopback && !entry.ifa_addr.is_null() {
                let family = (*entry.ifa_addr).sa_family as i32;
                if family == libc::AF_INET && v4.is_none() {
                    let sockaddr = entry.ifa_addr as *const libc::sockaddr_in;
                    let raw = (*sockaddr).sin_addr.s_addr;
                    v4 = Some(Ipv4Addr::from(u32::from_be(raw)));
                } else if family == libc::AF_INET6 && v6.is_none() {
                    let sockaddr = entry.ifa_addr as *const libc::sockaddr_in6;
                    v6 = Some(Ipv6Addr::from((*sockaddr).sin6_addr.s6_addr));
                }
            }
            cur = entry.ifa_next;
        }
        libc::freeifaddrs(head);
    }
    (v4, v6)
}

#[cfg(not(unix))]
fn scan_interfaces() -> (Option<Ipv4Addr>, Option<Ipv6Addr>) {
    (None, None)
}

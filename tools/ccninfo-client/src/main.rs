//! Diagnostic CLI that traces a name prefix through the network with
//! Ccninfo and prints the reply chain (§6). The flag parsing here is
//! illustrative, not part of the core contract (see the crate-level
//! non-goals) — it exists to exercise `codec`, `fib`'s sibling `ccninfo`
//! engine, and `config` end to end against a running forwarder.

use anyhow::{bail, Context, Result};
use ccninfo::{build_request, is_reply_valid, per_hop_latencies, ReplyCollector, RequestSpec};
use clap::{Parser, ValueEnum};
use codec::{ccninfo_parse, uri_to_name};
use config::ForwarderConfig;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, warn};
use types::{Name, RequestFlags, ValidationAlgType};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValidationAlgArg {
    Crc32,
    Sha256,
}

impl From<ValidationAlgArg> for ValidationAlgType {
    fn from(arg: ValidationAlgArg) -> Self {
        match arg {
            ValidationAlgArg::Crc32 => ValidationAlgType::Crc32C,
            ValidationAlgArg::Sha256 => ValidationAlgType::HmacSha256,
        }
    }
}

/// Traces a name prefix through the network with Ccninfo and prints the
/// reply chain (§6).
#[derive(Debug, Parser)]
#[command(name = "ccninfo")]
struct Cli {
    /// Name prefix to trace, e.g. ccnx:/example/test
    name_prefix: String,

    /// Set the FullDiscover flag
    #[arg(short = 'f')]
    full_discover: bool,

    /// Clear the Cache flag (set by default)
    #[arg(short = 'n')]
    no_cache: bool,

    /// Set the Publisher flag
    #[arg(short = 'o')]
    publisher: bool,

    /// Hop limit, 1..=255
    #[arg(short = 'r', default_value_t = 32)]
    hop_limit: u8,

    /// Skip-hop count; must be less than the hop limit
    #[arg(short = 's', default_value_t = 0)]
    skip_hop: u8,

    /// Validation algorithm to request
    #[arg(short = 'v', value_enum)]
    validation: Option<ValidationAlgArg>,

    /// Configuration directory (illustrative; not load bearing here)
    #[arg(short = 'd')]
    config_dir: Option<String>,

    /// Forwarder port on localhost
    #[arg(short = 'p', default_value_t = 9799)]
    port: u16,
}

fn flags_from_cli(cli: &Cli) -> RequestFlags {
    let mut flags = RequestFlags::new(RequestFlags::CACHE);
    if cli.no_cache {
        flags.clear(RequestFlags::CACHE);
    }
    if cli.full_discover {
        flags.set(RequestFlags::FULL_DISCOVER);
    }
    if cli.publisher {
        flags.set(RequestFlags::PUBLISHER);
    }
    flags
}

static QUIT: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_sig: libc::c_int) {
    QUIT.store(true, Ordering::Relaxed);
}

/// Installs a SIGINT handler that flips [`QUIT`]; the receive loop polls
/// it between reads (§5).
fn install_sigint_handler() {
    // SAFETY: `on_sigint` only touches a static `AtomicBool` via
    // signal-safe atomic stores, the one operation async-signal-safety
    // requires here.
    unsafe {
        libc::signal(libc::SIGINT, on_sigint as libc::sighandler_t);
    }
}

fn validate_args(cli: &Cli) -> Result<Name> {
    if cli.hop_limit == 0 {
        bail!("hop limit must be in 1..=255");
    }
    if cli.skip_hop >= cli.hop_limit {
        bail!("skip-hop count ({}) must be less than the hop limit ({})", cli.skip_hop, cli.hop_limit);
    }
    uri_to_name(&cli.name_prefix).with_context(|| format!("invalid name prefix {:?}", cli.name_prefix))
}

fn run(cli: Cli) -> Result<()> {
    let name = validate_args(&cli)?;
    let cfg = ForwarderConfig::default();

    let mut spec = RequestSpec::new(&name, cli.hop_limit);
    spec.skip_hop = cli.skip_hop;
    spec.flags = flags_from_cli(&cli);
    spec.validation_alg = cli.validation.map(Into::into);

    let mut buf = vec![0u8; cfg.max_msg_size];
    let (len, outstanding) = build_request(&mut buf, &cfg, &spec)?;
    info!(
        request_id = outstanding.request_id,
        hop_limit = outstanding.hop_limit,
        "built Ccninfo request for {}",
        cli.name_prefix
    );

    let socket = UdpSocket::bind("0.0.0.0:0").context("binding client socket")?;
    socket
        .connect(("127.0.0.1", cli.port))
        .with_context(|| format!("connecting to forwarder on port {}", cli.port))?;
    socket.set_read_timeout(Some(Duration::from_millis(200)))?;
    socket.send(&buf[..len]).context("sending Ccninfo request")?;

    install_sigint_handler();
    let mut collector = ReplyCollector::new(Duration::from_secs(cfg.ccninfo_reply_wait_secs));

    let mut recv_buf = vec![0u8; cfg.max_msg_size];
    while !collector.is_done() && !QUIT.load(Ordering::Relaxed) {
        match socket.recv(&mut recv_buf) {
            Ok(n) => {
                let pkt_len = u16::from_be_bytes([recv_buf[2], recv_buf[3]]) as usize;
                let hdr_len = recv_buf[7] as usize;
                if pkt_len > n {
                    warn!("reply claims {pkt_len} bytes but only {n} arrived, dropping");
                    continue;
                }
                let parsed = match ccninfo_parse(&recv_buf[..n], pkt_len, hdr_len) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(error = %e, "dropping unparsable reply");
                        continue;
                    }
                };
                if !is_reply_valid(&parsed, &outstanding) {
                    continue;
                }
                collector.accept(
                    parsed.report_chain.clone(),
                    Name::from_refs(&parsed.discovery_name),
                    parsed.reply_chain.clone(),
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => continue,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e).context("reading from forwarder socket"),
        }
    }

    let replies = collector.into_replies();
    if replies.is_empty() {
        println!("no reply received for {}", cli.name_prefix);
    }
    for reply in &replies {
        println!(
            "reply: {} hops, round-trip {:?}, {} cache entries",
            reply.report_chain.len(),
            reply.round_trip,
            reply.reply_chain.len()
        );
        for (hop, block) in reply.report_chain.iter().enumerate() {
            println!("  hop {hop}: node={}", hex::encode(block.node_id.as_bytes()));
        }
        for latency in per_hop_latencies(&reply.report_chain) {
            println!("  per-hop latency: {latency:?}");
        }
        for block in &reply.reply_chain {
            println!(
                "  cache entry: size={} count={} received_interests={} remaining_lifetime={}",
                block.object_size, block.object_count, block.received_interest_count, block.remaining_lifetime
            );
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("ccninfo: {e:#}");
        std::process::exit(-1);
    }
}

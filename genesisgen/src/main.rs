use std::time::Instant;

use bagcoin_consensus_core::config::Registry;
use bagcoin_consensus_core::header::Header;
use bagcoin_consensus_core::network::{NetworkKind, NetworkKindError};
use bagcoin_pow::State;
use bagcoin_utils::log::init_logger;
use clap::{Arg, Command};
use log::{info, warn};

const PROGRESS_INTERVAL: u64 = 10_000_000;

pub struct Args {
    pub network: NetworkKind,
    pub time: Option<u32>,
    pub bits: Option<u32>,
    pub message: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let m = cli().get_matches();
        Args {
            network: m.get_one::<NetworkKind>("network").cloned().unwrap(),
            time: m.get_one::<u32>("time").cloned(),
            bits: m.get_one::<u32>("bits").cloned(),
            message: m.get_one::<String>("message").cloned(),
        }
    }
}

pub fn cli() -> Command {
    Command::new("genesisgen")
        .about(format!("{} v{}", env!("CARGO_PKG_DESCRIPTION"), env!("CARGO_PKG_VERSION")))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("network")
                .long("network")
                .short('n')
                .value_name("network")
                .default_value("main")
                .value_parser(parse_network)
                .help("Network whose genesis template to start from (main, test, regtest, unittest)"),
        )
        .arg(
            Arg::new("time")
                .long("time")
                .short('t')
                .value_name("time")
                .value_parser(clap::value_parser!(u32))
                .help("Unix timestamp overriding the template's"),
        )
        .arg(
            Arg::new("bits")
                .long("bits")
                .short('b')
                .value_name("bits")
                .value_parser(parse_bits)
                .help("Compact difficulty bits in hex, e.g. 1e0ffff0"),
        )
        .arg(
            Arg::new("message")
                .long("message")
                .short('m')
                .value_name("message")
                .value_parser(parse_message)
                .help("Coinbase message overriding the template's"),
        )
}

fn parse_network(s: &str) -> Result<NetworkKind, String> {
    s.parse().map_err(|err: NetworkKindError| err.to_string())
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x");
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid compact bits '{}': {}", s, err))
}

fn parse_message(s: &str) -> Result<String, String> {
    // Must fit a single small script push
    if s.len() > 75 {
        return Err(format!("coinbase message is {} bytes, the limit is 75", s.len()));
    }
    Ok(s.to_owned())
}

fn main() {
    init_logger("info");
    let args = Args::parse();

    let registry = Registry::new().unwrap();
    let mut genesis = registry.get(args.network).genesis.clone();
    if let Some(time) = args.time {
        genesis.timestamp = time;
    }
    if let Some(bits) = args.bits {
        genesis.bits = bits;
    }
    if let Some(message) = &args.message {
        genesis.coinbase_message = Box::leak(message.clone().into_bytes().into_boxed_slice());
    }
    genesis.nonce = 0;

    let mut header = Header::from(&genesis);
    info!("{}: searching from time {} with bits {:#010x}", args.network, header.timestamp, header.bits);

    let started = Instant::now();
    let mut attempts = 0u64;
    'search: loop {
        // The pow state bakes the timestamp into the hasher prefix, so it is
        // rebuilt whenever the nonce space at one timestamp is exhausted.
        let state = State::new(&header);
        for nonce in 0..=u32::MAX {
            let (passed, _) = state.check_pow(nonce);
            attempts += 1;
            if passed {
                header.nonce = nonce;
                break 'search;
            }
            if attempts % PROGRESS_INTERVAL == 0 {
                let rate = attempts as f64 / started.elapsed().as_secs_f64();
                info!("{} hashes, {:.0} h/s, time {}", attempts, rate, header.timestamp);
            }
        }
        header.timestamp += 1;
    }

    info!("solved after {} hashes in {:.2}s", attempts, started.elapsed().as_secs_f64());
    info!("time    = {}", header.timestamp);
    info!("bits    = {:#010x}", header.bits);
    info!("nonce   = {}", header.nonce);
    info!("hash    = {}", header.hash());
    info!("merkle  = {}", header.merkle_root);

    if args.time.is_none() && args.bits.is_none() && args.message.is_none() {
        if header.hash() == genesis.expected_hash {
            info!("matches the recorded {} genesis", args.network);
        } else {
            warn!("does not match the recorded {} genesis {}", args.network, genesis.expected_hash);
        }
    }
}

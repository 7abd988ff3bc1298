//! datsearch CLI Client
//!
//! Interactive needle lookup against a search server.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use clap::Parser;
use datsearch::protocol::{ByteOrder, Occurrence, SearchMode};
use datsearch::{Client, Config, Endpoint};
use tracing_subscriber::{fmt, EnvFilter};

/// datsearch CLI
#[derive(Parser, Debug)]
#[command(name = "datsearch-cli")]
#[command(about = "Interactive client for a datsearch server")]
#[command(version)]
struct Args {
    /// Byte order shared with the server (little, big)
    #[arg(short, long, default_value = "little")]
    endian: ByteOrder,

    /// Network (tcp, unix)
    #[arg(short, long, default_value = "tcp")]
    network: String,

    /// Address (host:port or socket path)
    #[arg(short, long, default_value = "127.0.0.1:80")]
    address: String,

    /// Search mode: integer bitset or names such as first|needle|user-data
    #[arg(short = 'm', long, default_value = "7")]
    search_mode: SearchMode,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Logs go to stderr so results on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,datsearch=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let endpoint = match Endpoint::parse(&args.network, &args.address) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let config = Config::builder()
        .endpoint(endpoint)
        .byte_order(args.endian)
        .search_mode(args.search_mode)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    tracing::info!("datsearch CLI v{}", datsearch::VERSION);
    tracing::info!(
        "Server: {} ({} endian, mode {})",
        config.endpoint,
        config.byte_order,
        config.search_mode
    );

    let mut client = match Client::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut client, config.search_mode, config.byte_order) {
        // The connection is in an unknown state after a failed exchange
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Prompt for needles until stdin closes
fn run(client: &mut Client, mode: SearchMode, order: ByteOrder) -> datsearch::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "Needle: ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }
        let needle = line.trim_end_matches(['\n', '\r']);

        let occurrences = client.search(needle, mode)?;
        if occurrences.is_empty() {
            writeln!(stdout, "not found")?;
            continue;
        }
        for occurrence in &occurrences {
            writeln!(stdout, "{}", render(occurrence, mode, order))?;
        }
    }
}

/// One output line per occurrence, showing the fields the mode asked for
fn render(occurrence: &Occurrence, mode: SearchMode, order: ByteOrder) -> String {
    let mut out = String::from("found");
    if let Some(needle) = occurrence.needle.as_ref().filter(|_| mode.needle()) {
        let _ = write!(out, " \"{}\" ({})", needle.to_string_lossy(order), needle.len());
    }
    if mode.user_data() {
        let _ = write!(
            out,
            " data length: \"{}\" {}",
            String::from_utf8_lossy(&occurrence.data_value),
            occurrence.data_size()
        );
    }
    out
}

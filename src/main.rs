//! Facefeed CLI
//!
//! Usage:
//!   facefeed                                  # Live view of both subjects
//!   facefeed --endpoint ws://host:3000/       # Custom detection service
//!   facefeed --json                           # JSON output per tick
//!   facefeed --once                           # Single read, then exit
//!   facefeed --decode '<payload>'             # Run one payload through the decoder

use clap::Parser;
use serde_json::Value;
use std::time::Duration;

use facefeed::core::{start_ingest, ClientConfig, EventDecoder, SubjectStore};
use facefeed::types::StoreReport;
use facefeed::{DEFAULT_ENDPOINT, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "facefeed",
    version = VERSION,
    about = "Facefeed - live view of the face-detection event stream",
    long_about = "Facefeed connects to a face-tracking service, ingests its\n\
                  'detection' events and renders the latest known state of\n\
                  both tracked subjects.\n\n\
                  Fields per subject:\n  \
                  x, y    - bounding box top-left position\n  \
                  happy   - confidence for the 'happy' expression [0,1]\n\n\
                  Partial frames from the detector are dropped; readers only\n\
                  ever see the last fully valid observation."
)]
struct Args {
    /// Address of the detection service
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Decode a single payload (object or JSON text) and exit
    #[arg(short, long)]
    decode: Option<String>,

    /// Milliseconds between reads of the store
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Read the store once, print, and exit
    #[arg(long)]
    once: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("facefeed=info")),
        )
        .init();

    let args = Args::parse();

    if let Some(ref payload) = args.decode {
        run_decode(payload, &args);
    } else {
        run_live(&args).await;
    }
}

/// Decode one payload from the command line, without connecting
fn run_decode(text: &str, args: &Args) {
    let decoder = EventDecoder::new();

    // A well-formed JSON argument is the payload itself; anything else is
    // treated as a text-encoded payload
    let raw = serde_json::from_str::<Value>(text)
        .unwrap_or_else(|_| Value::String(text.to_string()));

    match decoder.decode(&raw) {
        Ok(frame) => {
            if args.json {
                println!("{}", serde_json::to_string(&frame).unwrap());
            } else {
                println!(
                    "player={} | x={:.1} | y={:.1} | happy={}",
                    frame.player,
                    frame.x,
                    frame.y,
                    frame
                        .happy
                        .map(|h| format!("{:.3}", h))
                        .unwrap_or_else(|| "absent".to_string())
                );
            }
        }
        Err(e) if e.is_drop() => {
            println!("dropped: {}", e);
        }
        Err(e) => {
            eprintln!("fatal: {}", e);
            std::process::exit(1);
        }
    }
}

/// Connect and render the store on every tick
async fn run_live(args: &Args) {
    let store = SubjectStore::new();
    let config = ClientConfig::new(&args.endpoint);

    let connection = match start_ingest(config, store.clone()).await {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Connection error: {}", e);
            std::process::exit(1);
        }
    };

    if !args.json {
        print_header(&args.endpoint, args.no_color);
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
    ticker.tick().await; // first tick completes immediately

    let closed = connection.closed();
    tokio::pin!(closed);

    loop {
        tokio::select! {
            _ = &mut closed => {
                eprintln!("Detection feed ended.");
                break;
            }
            _ = ticker.tick() => {
                let report = StoreReport::new(store.snapshot());
                if args.json {
                    println!("{}", serde_json::to_string(&report).unwrap());
                } else if args.no_color {
                    println!("{}", report.to_parseable_string());
                    println!();
                } else {
                    println!("{}", report.to_terminal_string());
                    println!();
                }
                if args.once {
                    break;
                }
            }
        }
    }
}

/// Print header
fn print_header(endpoint: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Facefeed v{}", VERSION);
        println!("  Feed: {}", endpoint);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  Facefeed v{}\x1b[0m", VERSION);
        println!("\x1b[1m  Feed: {}\x1b[0m", endpoint);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}

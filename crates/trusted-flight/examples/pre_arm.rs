//! Run the pre-arm trust check against files on disk
//!
//! ```text
//! cargo run --example pre_arm -- <key.pub> <token_issuer> <vehicle root>
//! ```
//!
//! The key and issuer are packed into an in-memory firmware image the way
//! the build does; the token is read from `<vehicle root>/trusted_flight/token`.
//! Set `RUST_LOG=trusted_flight=info` to see the event log.

use std::io::Write;
use std::process::ExitCode;

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trusted_flight::{LocalFilesystem, RomFs, SystemClock, TrustedFlight, TrustedFlightConfig};

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trusted_flight=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [key_path, issuer_path, vehicle_root] = args.as_slice() else {
        eprintln!("usage: pre_arm <key.pub> <token_issuer> <vehicle root>");
        return Ok(ExitCode::from(2));
    };

    let config = TrustedFlightConfig::default();
    let mut romfs = RomFs::new();
    romfs
        .insert("trusted_flight/key.pub", gzip(&std::fs::read(key_path)?)?)
        .insert("trusted_flight/token_issuer", gzip(&std::fs::read(issuer_path)?)?);

    let trusted_flight = TrustedFlight::new(
        config,
        romfs,
        LocalFilesystem::new(vehicle_root),
        SystemClock,
    );
    trusted_flight.init()?;

    let (armable, reason) = trusted_flight.is_trusted();
    println!("{reason}");
    Ok(if armable {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

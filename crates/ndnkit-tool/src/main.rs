//! ndnkit-tool
//!
//! - `ndnkit-tool encode <name-uri>`: print the Interest URI and its hex wire
//!   encoding
//! - `ndnkit-tool decode <hex>`: print the URI of a wire-encoded Interest
//! - Config from `NDNKIT_CONFIG` (default `ndnkit.yaml`), log level from
//!   `RUST_LOG`

use std::env;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use ndnkit_tool::{app_state, config};

const USAGE: &str = "usage: ndnkit-tool encode <name-uri> | decode <hex>";

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cfg_path = env::var("NDNKIT_CONFIG").ok();
    let cfg = config::load(cfg_path.as_deref()).expect("config load failed");
    let state = app_state::AppState::new(cfg).expect("app state init failed");

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [cmd, name] if cmd == "encode" => state.encode(name).map(|(interest, wire)| {
            println!("{interest}");
            println!("{}", hex::encode(wire.buf()));
        }),
        [cmd, input] if cmd == "decode" => match hex::decode(input.trim()) {
            Ok(bytes) => state.decode(&bytes).map(|interest| println!("{interest}")),
            Err(e) => {
                eprintln!("invalid hex input: {e}");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "command failed");
            eprintln!("{}: {e}", e.code().as_str());
            ExitCode::FAILURE
        }
    }
}

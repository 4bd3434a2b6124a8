use clap::Parser;
use mahjong_exchange_solver::api;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mahjong-exchange-solver")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_COMMIT"), ")"))]
#[command(about = "Rank candidate hands by the tiles left to win after exchanges", long_about = None)]
struct Args {
    /// JSON evaluate request (reads stdin when omitted)
    request: Option<PathBuf>,
}

/// Read an evaluate request from the given file, or stdin when none is given
fn read_request(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e)),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(input)
        }
    }
}

fn run(path: Option<&Path>) -> Result<String, String> {
    let request = read_request(path)?;
    let response = api::evaluate_request(&request)?;
    serde_json::to_string_pretty(&response).map_err(|e| format!("Serialization error: {}", e))
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args.request.as_deref()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! Offline crop advice
//!
//! Scores a saved request without running the server and prints the advice
//! as JSON.
//!
//! Usage: cargo run --bin advise -- <request.json> [--catalog <catalog.json>]
//!
//! The request file holds `{"context": {...}, "preferences": {...}}`; both
//! keys are optional.

use anyhow::Result;
use krishi_advisor::cli;

fn main() -> Result<()> {
    let args = cli::parse_args(std::env::args().skip(1))?;
    let advice = cli::run(&args)?;

    println!("{}", serde_json::to_string_pretty(&advice)?);
    Ok(())
}

//! Offline advice command
//!
//! Argument parsing and request loading for the `advise` binary, kept in
//! the library so they can be tested without spawning a process.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::advisor::{AdvisorOptions, CropAdvice, CropAdvisor};
use crate::catalog::Catalog;
use crate::context::{FarmerPreferences, SiteContext};
use crate::market::MarketSignals;

pub const USAGE: &str = "usage: advise <request.json> [--catalog <catalog.json>]";

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviseArgs {
    pub request: PathBuf,
    pub catalog: Option<PathBuf>,
}

/// Contents of a request file; both keys are optional
#[derive(Debug, Default, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub context: SiteContext,
    #[serde(default)]
    pub preferences: FarmerPreferences,
}

/// Parse arguments, program name already stripped
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<AdviseArgs> {
    let mut args = args.into_iter();
    let mut request = None;
    let mut catalog = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => match args.next() {
                Some(path) => catalog = Some(PathBuf::from(path)),
                None => bail!("--catalog needs a path"),
            },
            _ if request.is_none() => request = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument '{}'", arg),
        }
    }

    match request {
        Some(request) => Ok(AdviseArgs { request, catalog }),
        None => bail!(USAGE),
    }
}

pub fn load_request(path: &Path) -> Result<AdviceRequest> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| "Failed to parse request JSON")
}

/// Load the request (and catalog, if given) and score it
pub fn run(args: &AdviseArgs) -> Result<CropAdvice> {
    let request = load_request(&args.request)?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::default(),
    };

    let advisor = CropAdvisor::new(catalog, MarketSignals::default(), AdvisorOptions::default());
    Ok(advisor.advise(&request.context, &request.preferences))
}

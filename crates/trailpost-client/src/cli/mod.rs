//! `trailpost-cli` front end: argument parsing, dispatch, and output.

mod args;
mod handlers;
mod paragraphs;
mod print;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::client::ClientError;

pub use args::Cli;
pub use handlers::run;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required; pass --site or set TRAILPOST_SITE_URL")]
    MissingSite,
    #[error("failed to read {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0}")]
    Api(Arc<ClientError>),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<Arc<ClientError>> for CliError {
    fn from(err: Arc<ClientError>) -> Self {
        Self::Api(err)
    }
}

//! Error types for configuration and caller-side request validation.
//!
//! Network failures never show up here: the transport records them on the
//! outcome of the attempt instead.

use std::fmt::Write;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The target has no URL after trimming.
    #[error("please enter an API URL")]
    EmptyUrl,

    /// The URL is not an absolute URI.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only GET, POST, PUT and DELETE can be probed.
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    /// POST and PUT targets need a well-formed JSON body.
    #[error("invalid JSON body: {0}")]
    InvalidJsonBody(#[source] serde_json::Error),

    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// An environment override that is not a valid number.
    #[error("invalid value '{value}' for {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Flattens an error and its `source()` chain into one printable string.
pub fn error_chain(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}

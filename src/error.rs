//! Error kinds shared across the catalog, composer, client and session.

use thiserror::Error;

use crate::jargon::PLACEHOLDER;

/// Failures of a single submission to the execution service.
#[derive(Error, Debug)]
pub enum ExecError {
    /// DNS, refused connection, TLS and other transport failures.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an error; its message is kept verbatim.
    #[error("service error: {0}")]
    Service(String),

    #[error("timed out after {0:?} waiting for the execution service")]
    Timeout(std::time::Duration),
}

/// Problems with a jargon template or with code being wrapped in one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("jargon must contain the placeholder `{PLACEHOLDER}`")]
    MissingPlaceholder,

    #[error("jargon must contain the placeholder `{PLACEHOLDER}` exactly once (found {0})")]
    MultiplePlaceholders(usize),

    #[error("code contains the placeholder `{PLACEHOLDER}` and cannot be wrapped in jargon")]
    PlaceholderCollision,
}

/// Recoverable mistakes in what the user typed at the prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid language: `{0}`")]
    UnknownLanguage(String),

    #[error("no code was given to run")]
    EmptyCode,

    #[error("code block was not closed with ```")]
    UnclosedBlock,

    #[error("`{0}` is not an alias")]
    NotAnAlias(String),

    #[error("`{0}` is already a language")]
    AlreadyALanguage(String),

    #[error("`{0}` has no jargon")]
    NoJargon(String),

    #[error("{0}")]
    Usage(&'static str),

    #[error("Invalid input. Enter `help` for help.")]
    UnknownCommand,
}

/// Failures reading or writing the override file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("override file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("override file {path} is not valid: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

//! CLI error type with miette diagnostics.

use std::{io, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use hypercoll::HyperCollError;

/// Errors reported by the HyperColl CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error on `{path}`: {source}")]
    #[diagnostic(code(hypercoll::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse `{path}`: {message}")]
    #[diagnostic(code(hypercoll::toml))]
    Parse {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("Missing configuration file: {0}")]
    #[diagnostic(
        code(hypercoll::config),
        help("pass an existing file to --config, or omit it to use the defaults")
    )]
    MissingConfig(PathBuf),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(hypercoll::validation))]
    Validation(String),

    #[error("Render error: {0}")]
    #[diagnostic(code(hypercoll::render))]
    Render(#[from] HyperCollError),
}

impl CliError {
    /// Creates an [`CliError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`CliError::Parse`] pointing into `content`.
    pub fn parse(path: impl Into<PathBuf>, content: &str, err: &toml::de::Error) -> Self {
        let path = path.into();
        Self::Parse {
            message: err.message().to_string(),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: err.span().map(SourceSpan::from),
            path,
        }
    }
}

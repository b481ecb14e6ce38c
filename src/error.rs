use std::{io, path::PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error parsing config: file argument is empty")]
    EmptyConfigPath,

    #[error("error parsing config: absolute file path lookup failed: {0}")]
    PathResolution(#[source] io::Error),

    #[error("error locating {}: working directory is unavailable: {0}", DEFAULT_CONFIG_FILE)]
    WorkingDirectoryUnavailable(#[source] io::Error),

    #[error("unknown command \"{0}\" for \"pgql\"")]
    UnknownCommand(String),

    #[error("{} already exists", path.display())]
    ConfigExists { path: PathBuf },

    #[error("error parsing {}: file does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("error parsing {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing output: {0}")]
    Output(#[source] io::Error),

    #[error("{program} {}", describe_exit(*code))]
    ExternalProcess { program: String, code: Option<i32> },

    #[error("interrupted")]
    Cancelled,
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure. Only an external process that
    /// reported its own status passes it through; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ExternalProcess {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

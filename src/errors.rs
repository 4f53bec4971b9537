use thiserror;

use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "Need to enter a fwd/rev primer or a valid primer set name. Try --help at command line"
    )]
    NoPrimerSource,

    #[error("Missing required option \"--{name}\"")]
    MissingArgument { name: &'static str },

    #[error("Unknown primer set \"{name}\". Valid primer sets are: amoA, nxrB, 16S_515F_926R")]
    UnknownPreset { name: String },

    #[error("Could not compile filename pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Could not build search pattern \"{pattern}\": {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Error parsing config file \"{}\": {source}", .file.display())]
    ParseConfig {
        file: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Could not run \"{tool}\". Is it installed and on your PATH? {source}")]
    ToolNotFound {
        tool: String,
        source: std::io::Error,
    },

    #[error("\"{tool} --version\" exited with {status}")]
    ToolUnusable { tool: String, status: ExitStatus },

    #[error("Uneven number of files ({count}) in \"{}\". Check raw reads", .dir.display())]
    OddBatch { dir: PathBuf, count: usize },

    #[error("No read files found in \"{}\". Check raw reads", .dir.display())]
    EmptyBatch { dir: PathBuf },

    #[error("Sample \"{sample}\" has no {missing} read file")]
    UnpairedSample {
        sample: String,
        missing: &'static str,
    },

    #[error("Cannot decide whether \"{}\" is a forward or a reverse read", .file.display())]
    AmbiguousRole { file: PathBuf },

    #[error("Could not start \"{tool}\" on \"{}\": {source}", .input.display())]
    ToolSpawn {
        tool: String,
        input: PathBuf,
        source: std::io::Error,
    },

    #[error("\"{tool}\" failed on \"{}\" with {status}", .input.display())]
    ToolFailed {
        tool: String,
        input: PathBuf,
        status: ExitStatus,
    },

    #[error("Error reading or writing \"{}\": {source}", .file.display())]
    FileIo {
        file: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Broad class of the failure, used to prefix diagnostics.
    pub fn category(&self) -> &'static str {
        use Error::*;
        match self {
            NoPrimerSource
            | MissingArgument { .. }
            | UnknownPreset { .. }
            | InvalidPattern { .. }
            | InvalidGlob { .. }
            | ParseConfig { .. } => "configuration",
            ToolNotFound { .. } | ToolUnusable { .. } => "environment",
            OddBatch { .. }
            | EmptyBatch { .. }
            | UnpairedSample { .. }
            | AmbiguousRole { .. } => "batch validation",
            ToolSpawn { .. } | ToolFailed { .. } => "external tool",
            FileIo { .. } => "filesystem",
        }
    }

    pub(crate) fn file_io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            file: file.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_failure_stage() {
        assert_eq!(Error::NoPrimerSource.category(), "configuration");
        assert_eq!(
            Error::OddBatch {
                dir: PathBuf::from("raw"),
                count: 5
            }
            .category(),
            "batch validation"
        );
        assert_eq!(
            Error::EmptyBatch {
                dir: PathBuf::from("raw")
            }
            .category(),
            "batch validation"
        );
        assert_eq!(
            Error::file_io("x", std::io::Error::from(std::io::ErrorKind::NotFound)).category(),
            "filesystem"
        );
    }

    #[test]
    fn odd_batch_message_names_count_and_dir() {
        let e = Error::OddBatch {
            dir: PathBuf::from("raw"),
            count: 3,
        };
        assert_eq!(
            e.to_string(),
            "Uneven number of files (3) in \"raw\". Check raw reads"
        );
    }
}

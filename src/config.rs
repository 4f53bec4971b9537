//! Run configuration, from command line flags and/or a YAML file.
//!
//! A YAML config uses the same keys as the long command line flags:
//! ```yaml
//! primer_set: amoA
//! raw_dir: raw_reads/
//! out_dir: trimmed/
//! pairing: pattern
//! fwd_pattern: "_R1"
//! rev_pattern: "_R2"
//! ```

use serde::Deserialize;

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::pairing::PairingStrategy;
use crate::primers::Preset;

pub const DEFAULT_FWD_PATTERN: &str = "_R1";
pub const DEFAULT_REV_PATTERN: &str = "_R2";
pub const DEFAULT_CUTADAPT: &str = "cutadapt";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub primer_set: Option<Preset>,
    pub fwd: Option<String>,
    pub rev: Option<String>,
    pub raw_dir: Option<PathBuf>,
    /// Empty means the current directory.
    pub out_dir: PathBuf,
    pub verify_only: bool,
    pub names: bool,
    pub pairing: PairingStrategy,
    pub fwd_pattern: String,
    pub rev_pattern: String,
    pub cutadapt: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primer_set: None,
            fwd: None,
            rev: None,
            raw_dir: None,
            out_dir: PathBuf::new(),
            verify_only: false,
            names: false,
            pairing: PairingStrategy::default(),
            fwd_pattern: DEFAULT_FWD_PATTERN.to_owned(),
            rev_pattern: DEFAULT_REV_PATTERN.to_owned(),
            cutadapt: PathBuf::from(DEFAULT_CUTADAPT),
        }
    }
}

/// What a run does with the batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Trim every file.
    Full,
    /// Trim only the first forward/reverse pair.
    VerifyOnly,
    /// Only report sample names.
    NamesOnly,
}

impl Config {
    pub fn from_yaml(yaml: &str, file: impl AsRef<Path>) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::ParseConfig {
            file: file.as_ref().to_owned(),
            source: e,
        })
    }

    pub fn from_yaml_file(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let yaml = fs::read_to_string(file).map_err(|e| Error::file_io(file, e))?;
        Self::from_yaml(&yaml, file)
    }

    pub fn raw_dir(&self) -> Result<&Path> {
        self.raw_dir
            .as_deref()
            .ok_or(Error::MissingArgument { name: "raw_dir" })
    }

    pub fn mode(&self) -> Mode {
        if self.names {
            Mode::NamesOnly
        } else if self.verify_only {
            Mode::VerifyOnly
        } else {
            Mode::Full
        }
    }
}

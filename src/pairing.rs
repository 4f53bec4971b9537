//! Deciding which file of a batch is the forward read and which is the reverse read.
//!
//! The dispatcher always assigns roles by position: even indices are forward reads and odd
//! indices are reverse reads. A [`Pairing`] arranges a discovered batch so that this holds.

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::naming::sample_name;

pub use Role::*;

/// Read direction of one file in a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Forward,
    Reverse,
}

impl Role {
    /// Role of the file at `idx` in an arranged batch.
    pub fn from_index(idx: usize) -> Self {
        if idx % 2 == 0 {
            Forward
        } else {
            Reverse
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Forward => "F_",
            Reverse => "R_",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Forward => write!(f, "forward"),
            Reverse => write!(f, "reverse"),
        }
    }
}

/// How files are matched into forward/reverse pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum PairingStrategy {
    /// Sorted discovery order, forward then reverse.
    #[default]
    #[serde(rename = "positional")]
    #[value(name = "positional")]
    PositionalParity,
    /// Forward and reverse files are told apart by filename patterns and grouped by sample name.
    #[serde(rename = "pattern")]
    #[value(name = "pattern")]
    FilenamePattern,
}

pub enum Pairing {
    Positional,
    Pattern { forward: Regex, reverse: Regex },
}

impl Pairing {
    pub fn new(
        strategy: PairingStrategy,
        fwd_pattern: impl AsRef<str>,
        rev_pattern: impl AsRef<str>,
    ) -> Result<Self> {
        match strategy {
            PairingStrategy::PositionalParity => Ok(Pairing::Positional),
            PairingStrategy::FilenamePattern => Ok(Pairing::Pattern {
                forward: compile(fwd_pattern.as_ref())?,
                reverse: compile(rev_pattern.as_ref())?,
            }),
        }
    }

    /// Order `files` so that each sample's forward file directly precedes its reverse file.
    ///
    /// `dir` is only used for diagnostics.
    pub fn arrange(&self, files: Vec<PathBuf>, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        validate(&files, dir)?;

        match self {
            Pairing::Positional => Ok(files),
            Pairing::Pattern { forward, reverse } => arrange_by_pattern(files, forward, reverse),
        }
    }
}

/// Fails if the batch is empty or cannot be split into pairs.
pub fn validate(files: &[PathBuf], dir: impl AsRef<Path>) -> Result<()> {
    if files.is_empty() {
        return Err(Error::EmptyBatch {
            dir: dir.as_ref().to_owned(),
        });
    }
    if files.len() % 2 != 0 {
        return Err(Error::OddBatch {
            dir: dir.as_ref().to_owned(),
            count: files.len(),
        });
    }
    Ok(())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_owned(),
        source: e,
    })
}

fn arrange_by_pattern(
    files: Vec<PathBuf>,
    forward: &Regex,
    reverse: &Regex,
) -> Result<Vec<PathBuf>> {
    let mut samples: FxHashMap<String, [Option<PathBuf>; 2]> = FxHashMap::default();

    for file in files {
        let base = file
            .file_name()
            .map(|b| b.to_string_lossy().into_owned())
            .unwrap_or_default();

        let slot = match (forward.is_match(&base), reverse.is_match(&base)) {
            (true, false) => 0,
            (false, true) => 1,
            _ => return Err(Error::AmbiguousRole { file }),
        };

        let entry = samples.entry(sample_name(&file)).or_default();
        if entry[slot].is_some() {
            return Err(Error::AmbiguousRole { file });
        }
        entry[slot] = Some(file);
    }

    let mut names = samples.keys().cloned().collect::<Vec<_>>();
    names.sort();

    let mut res = Vec::with_capacity(names.len() * 2);
    for name in names {
        let Some([fwd, rev]) = samples.remove(&name) else {
            continue;
        };
        let fwd = fwd.ok_or_else(|| Error::UnpairedSample {
            sample: name.clone(),
            missing: "forward",
        })?;
        let rev = rev.ok_or_else(|| Error::UnpairedSample {
            sample: name.clone(),
            missing: "reverse",
        })?;
        res.push(fwd);
        res.push(rev);
    }

    Ok(res)
}

//! Prepare paired-end amplicon reads for DADA2.
//!
//! # Overview
//! DADA2 expects demultiplexed reads with the primers already removed. `ampliprep` walks a
//! directory of raw reads, decides which file of each sample is the forward read and which is
//! the reverse read, and trims the matching primer from the 5' end of every read with
//! [cutadapt](https://cutadapt.readthedocs.io). Reads where the primer is not found are
//! discarded. Files are trimmed one at a time and the first failure stops the whole batch.
//!
//! ## Primers
//! A run uses either a built-in [`Preset`] (`amoA`, `nxrB`, `16S_515F_926R`) or a custom
//! forward/reverse pair. A preset always wins over custom primers. See [`PrimerSet::resolve`].
//!
//! ## Pairing
//! Discovered files are sorted by path. With the default [`PairingStrategy::PositionalParity`],
//! files at even positions are forward reads and files at odd positions are reverse reads, so
//! each sample's forward file must sort directly before its reverse file. The
//! [`PairingStrategy::FilenamePattern`] strategy instead recognizes forward and reverse files by
//! regexes and groups them by sample name.
//!
//! ## Output names
//! The sample name of a file is its basename up to the first `_`. Outputs are written as
//! `F_<sample>.fastq` and `R_<sample>.fastq` in a single output directory:
//! ```
//! use ampliprep::*;
//! use std::path::PathBuf;
//!
//! assert_eq!(sample_name("/a/b/Sample01_R1.fastq"), "Sample01");
//! assert_eq!(
//!     output_path("/out/", "/a/b/Sample01_R1.fastq", Forward),
//!     PathBuf::from("/out/F_Sample01.fastq")
//! );
//! ```
//!
//! ## Modes
//! * [`Mode::Full`]: trim every file.
//! * [`Mode::VerifyOnly`]: trim the first pair only, as a smoke test of the primers.
//! * [`Mode::NamesOnly`]: list the sample names without trimming or creating anything.

pub mod app;
pub mod config;
pub mod discover;
pub mod dispatch;
pub mod errors;
pub mod naming;
pub mod pairing;
pub mod primers;
pub mod trimmer;

// commonly used functions and types

pub use crate::app::*;
pub use crate::config::*;
pub use crate::discover::*;
pub use crate::dispatch::*;
pub use crate::errors::{Error, Result};
pub use crate::naming::*;
pub use crate::pairing::*;
pub use crate::primers::*;
pub use crate::trimmer::*;

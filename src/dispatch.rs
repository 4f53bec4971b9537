use log::{info, warn};

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Mode;
use crate::errors::*;
use crate::naming::*;
use crate::pairing::Role;
use crate::primers::PrimerSet;
use crate::trimmer::Trimmer;

/// One external trimming call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrimJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub adapter: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Sample name of every file, in batch order. Nothing was trimmed.
    Names(Vec<String>),
    /// Jobs that ran to completion, in order.
    Trimmed(Vec<TrimJob>),
}

/// Build the trimming job for every file of an arranged batch.
pub fn plan(files: &[PathBuf], primers: &PrimerSet, out_dir: impl AsRef<Path>) -> Vec<TrimJob> {
    files
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let role = Role::from_index(i);
            TrimJob {
                input: input.clone(),
                output: output_path(out_dir.as_ref(), input, role),
                adapter: primers.for_role(role).to_owned(),
                role,
            }
        })
        .collect()
}

/// Trim an arranged batch, one file at a time.
///
/// The first failing file aborts the batch; outputs already written are left in place.
pub fn run_batch(
    files: &[PathBuf],
    primers: &PrimerSet,
    out_dir: impl AsRef<Path>,
    mode: Mode,
    trimmer: &dyn Trimmer,
) -> Result<BatchOutcome> {
    if mode == Mode::NamesOnly {
        return Ok(BatchOutcome::Names(files.iter().map(|f| sample_name(f)).collect()));
    }

    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| Error::file_io(out_dir, e))?;

    for (output, inputs) in collisions(out_dir, files) {
        warn!(
            "{} inputs write to \"{}\", only the last one will be kept: {:?}",
            inputs.len(),
            output.display(),
            inputs
        );
    }

    let jobs = plan(files, primers, out_dir);
    let total = jobs.len();
    let mut done = Vec::with_capacity(total);

    for (i, job) in jobs.into_iter().enumerate() {
        info!(
            "[{}/{}] {} {} read \"{}\" -> \"{}\"",
            i + 1,
            total,
            trimmer.name(),
            job.role,
            job.input.display(),
            job.output.display()
        );
        trimmer.trim(&job.input, &job.output, &job.adapter)?;

        let role = job.role;
        done.push(job);

        if mode == Mode::VerifyOnly && role == Role::Reverse {
            info!("Verified the first pair, stopping");
            break;
        }
    }

    Ok(BatchOutcome::Trimmed(done))
}

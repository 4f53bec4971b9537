//! External adapter trimming.

use log::{debug, info};

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DEFAULT_CUTADAPT;
use crate::errors::*;

/// Removes a 5' adapter from every read of a file, keeping only reads where it was found.
pub trait Trimmer {
    /// Trim `adapter` from `input` and write the trimmed reads to `output`.
    ///
    /// Blocks until trimming is complete. Any failure is fatal for the batch.
    fn trim(&self, input: &Path, output: &Path, adapter: &str) -> Result<()>;
    fn name(&self) -> &str;
}

/// Trimming through the `cutadapt` executable.
#[derive(Clone, Debug)]
pub struct Cutadapt {
    program: PathBuf,
    name: String,
}

impl Default for Cutadapt {
    fn default() -> Self {
        Self::new(DEFAULT_CUTADAPT)
    }
}

impl Cutadapt {
    /// `program` is looked up on `PATH` unless it contains a path separator.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program.display().to_string();
        Self { program, name }
    }

    /// Check that the executable can be run, returning its version.
    pub fn validate_installation(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| Error::ToolNotFound {
                tool: self.name.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::ToolUnusable {
                tool: self.name.clone(),
                status: output.status,
            });
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        info!("Using {} {}", self.name, version);
        Ok(version)
    }

    pub fn command(&self, input: &Path, output: &Path, adapter: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-g")
            .arg(adapter)
            .arg("-o")
            .arg(output)
            .arg("--discard-untrimmed")
            .arg(input);
        cmd
    }
}

impl Trimmer for Cutadapt {
    fn trim(&self, input: &Path, output: &Path, adapter: &str) -> Result<()> {
        let mut cmd = self.command(input, output, adapter);
        debug!("Running {:?}", cmd);

        // stdout and stderr are inherited so the cutadapt report reaches the user
        let status = cmd.status().map_err(|e| Error::ToolSpawn {
            tool: self.name.clone(),
            input: input.to_owned(),
            source: e,
        })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                tool: self.name.clone(),
                input: input.to_owned(),
                status,
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::OsStr;

    #[test]
    fn command_passes_discrete_arguments() {
        let cutadapt = Cutadapt::default();
        let cmd = cutadapt.command(
            Path::new("raw/S1 ; rm -rf _R1.fastq"),
            Path::new("out/F_S1.fastq"),
            "GGGGTTTCTACTGGTGGT",
        );

        assert_eq!(cmd.get_program(), OsStr::new("cutadapt"));
        let args = cmd.get_args().collect::<Vec<_>>();
        assert_eq!(
            args,
            vec![
                OsStr::new("-g"),
                OsStr::new("GGGGTTTCTACTGGTGGT"),
                OsStr::new("-o"),
                OsStr::new("out/F_S1.fastq"),
                OsStr::new("--discard-untrimmed"),
                OsStr::new("raw/S1 ; rm -rf _R1.fastq"),
            ]
        );
    }

    #[test]
    fn missing_program_is_environment_error() {
        let cutadapt = Cutadapt::new("/nonexistent/bin/cutadapt-does-not-exist");
        let err = cutadapt.validate_installation().unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert_eq!(err.category(), "environment");
    }

    #[test]
    fn missing_program_fails_trim() {
        let cutadapt = Cutadapt::new("/nonexistent/bin/cutadapt-does-not-exist");
        let err = cutadapt
            .trim(Path::new("in.fastq"), Path::new("out.fastq"), "ACGT")
            .unwrap_err();
        assert!(matches!(err, Error::ToolSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_tool_failure() {
        let cutadapt = Cutadapt::new("false");
        let err = cutadapt
            .trim(Path::new("in.fastq"), Path::new("out.fastq"), "ACGT")
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
        assert_eq!(err.category(), "external tool");
    }
}

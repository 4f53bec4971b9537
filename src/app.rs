use colored::Colorize;
use log::info;

use std::sync::Once;

use crate::config::{Config, Mode};
use crate::discover::discover;
use crate::dispatch::*;
use crate::errors::*;
use crate::pairing::Pairing;
use crate::primers::PrimerSet;
use crate::trimmer::{Cutadapt, Trimmer};

static BANNER: Once = Once::new();

/// Print the program banner to stderr. Only the first call prints anything.
pub fn initialize() {
    BANNER.call_once(|| {
        eprintln!();
        eprintln!("{}", "ampliprep: DADA2 cutadapt preparation".bold());
        eprintln!("v{}", env!("CARGO_PKG_VERSION"));
        eprintln!();
    });
}

/// A validated run: resolved primers plus the trimming tool.
pub struct App<T: Trimmer> {
    config: Config,
    primers: PrimerSet,
    trimmer: T,
}

impl App<Cutadapt> {
    pub fn new(config: Config) -> Result<Self> {
        let trimmer = Cutadapt::new(config.cutadapt.clone());
        Self::with_trimmer(config, trimmer)
    }

    /// Fail early if cutadapt cannot be run.
    pub fn check_environment(&self) -> Result<()> {
        self.trimmer.validate_installation().map(|_| ())
    }
}

impl<T: Trimmer> App<T> {
    /// Check the configuration without touching the filesystem.
    pub fn with_trimmer(config: Config, trimmer: T) -> Result<Self> {
        config.raw_dir()?;
        let primers = PrimerSet::resolve(&config)?;

        Ok(Self {
            config,
            primers,
            trimmer,
        })
    }

    pub fn primers(&self) -> &PrimerSet {
        &self.primers
    }

    /// Discover, pair and trim the batch.
    pub fn run(&self) -> Result<BatchOutcome> {
        let raw_dir = self.config.raw_dir()?;
        let mode = self.config.mode();

        info!(
            "Primers: forward {}, reverse {}",
            self.primers.forward, self.primers.reverse
        );

        let pairing = Pairing::new(
            self.config.pairing,
            &self.config.fwd_pattern,
            &self.config.rev_pattern,
        )?;
        let files = pairing.arrange(discover(raw_dir)?, raw_dir)?;
        info!("{} read files, {} pairs", files.len(), files.len() / 2);

        let outcome = run_batch(
            &files,
            &self.primers,
            &self.config.out_dir,
            mode,
            &self.trimmer,
        )?;

        if let BatchOutcome::Trimmed(jobs) = &outcome {
            info!(
                "Trimmed {} files into \"{}\"{}",
                jobs.len(),
                self.config.out_dir.display(),
                if mode == Mode::VerifyOnly { " (verify only)" } else { "" }
            );
        }

        Ok(outcome)
    }
}

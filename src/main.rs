use clap::{ArgAction, CommandFactory, Parser};
use clap::error::ErrorKind;
use colored::Colorize;

use std::path::PathBuf;
use std::process;

use ampliprep::*;

/// Trim primers from paired-end amplicon reads with cutadapt, ready for DADA2.
#[derive(Parser, Debug)]
#[command(name = "ampliprep", version, arg_required_else_help = true)]
struct Cli {
    /// Predefined primer sets
    #[arg(long = "primer_set", value_enum)]
    primer_set: Option<Preset>,

    /// Directory with raw fastq reads
    #[arg(long = "raw_dir", required_unless_present_any = ["config", "list_presets"])]
    raw_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long = "out_dir")]
    out_dir: Option<PathBuf>,

    /// New forward primer (Ignored if using the primer_set option)
    #[arg(long = "fwd")]
    fwd: Option<String>,

    /// New reverse primer (Ignored if using the primer_set option)
    #[arg(long = "rev")]
    rev: Option<String>,

    /// Verifies the first sample contains the specified primers, prints cutadapt output and exits.
    #[arg(long = "verify_only", action = ArgAction::SetTrue)]
    verify_only: bool,

    /// Prints the trimmed names for each sample. Does not actually trim reads
    #[arg(long = "names", action = ArgAction::SetTrue)]
    names: bool,

    /// YAML file with any of the above options; flags override it
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// How forward and reverse files are matched
    #[arg(long = "pairing", value_enum)]
    pairing: Option<PairingStrategy>,

    /// Regex identifying forward read files (pattern pairing)
    #[arg(long = "fwd_pattern")]
    fwd_pattern: Option<String>,

    /// Regex identifying reverse read files (pattern pairing)
    #[arg(long = "rev_pattern")]
    rev_pattern: Option<String>,

    /// cutadapt executable
    #[arg(long = "cutadapt")]
    cutadapt: Option<PathBuf>,

    /// Print the predefined primer sets and exit
    #[arg(long = "list_presets", action = ArgAction::SetTrue)]
    list_presets: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(file) => Config::from_yaml_file(file)?,
            None => Config::default(),
        };

        if self.primer_set.is_some() {
            config.primer_set = self.primer_set;
        }
        if self.fwd.is_some() {
            config.fwd = self.fwd;
        }
        if self.rev.is_some() {
            config.rev = self.rev;
        }
        if self.raw_dir.is_some() {
            config.raw_dir = self.raw_dir;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if let Some(pairing) = self.pairing {
            config.pairing = pairing;
        }
        if let Some(p) = self.fwd_pattern {
            config.fwd_pattern = p;
        }
        if let Some(p) = self.rev_pattern {
            config.rev_pattern = p;
        }
        if let Some(cutadapt) = self.cutadapt {
            config.cutadapt = cutadapt;
        }
        config.verify_only |= self.verify_only;
        config.names |= self.names;

        Ok(config)
    }
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = Cli::command().print_help();
                eprintln!("\n\nNeed command line input\n");
                process::exit(e.exit_code());
            }
            _ => {
                let _ = Cli::command().print_help();
                eprintln!("\n\n{e}");
                process::exit(e.exit_code());
            }
        },
    }
}

fn print_presets() {
    for preset in Preset::all() {
        let primers = preset.primers();
        println!("{}\t{}\t{}", preset, primers.forward, primers.reverse);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let app = App::new(config.clone())?;

    if config.mode() != Mode::NamesOnly {
        app.check_environment()?;
    }

    if let BatchOutcome::Names(names) = app.run()? {
        for name in names {
            println!("{name}");
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    initialize();

    let cli = parse_cli();

    if cli.list_presets {
        print_presets();
        return;
    }

    if let Err(e) = run(cli) {
        let label = format!("{} error:", e.category());
        eprintln!("{} {}", label.red().bold(), e);
        process::exit(1);
    }
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use relativize_core::{
    rewrite_tree, Config, OutputFormat, OutputFormatter, RewriteOptions, RuleSet,
};
use std::path::PathBuf;
use std::process;

/// Rewrite absolute paths in CMake-generated Xcode projects to relative paths
#[derive(Parser, Debug)]
#[command(name = "relativize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory tree to scan
    #[arg(default_value = ".", value_name = "ROOT")]
    root: PathBuf,

    /// Load settings from this file instead of ./relativize.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report what would change without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Suppress the startup banner and per-file progress lines
    #[arg(short, long)]
    quiet: bool,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputArg::Summary)]
    output: OutputArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Summary,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Summary => Self::Summary,
            OutputArg::Json => Self::Json,
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let rules = RuleSet::from_config(&config)?;

    let options = RewriteOptions {
        root: cli.root.clone(),
        dry_run: cli.dry_run,
        // Progress lines on stdout would corrupt the JSON document
        quiet: cli.quiet || cli.output == OutputArg::Json,
    };

    let report = rewrite_tree(&options, &config, &rules)?;
    let formatted = report.format(cli.output.into());
    if formatted.ends_with('\n') {
        print!("{formatted}");
    } else {
        println!("{formatted}");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");

            // Bad input (root, config, rule set) vs. everything else
            let message = e.to_string();
            let exit_code = if message.contains("invalid")
                || message.contains("not a directory")
                || message.contains("failed to read root")
                || message.contains("config")
            {
                2
            } else {
                1
            };

            process::exit(exit_code);
        },
    }
}

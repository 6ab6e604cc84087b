use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use file_analyzer::report::stderr_color;
use file_analyzer::{IdentityStrategy, ReportPrinter, WalkConfig, Walker};

#[derive(Parser)]
#[command(
    name = "file-analyzer",
    version,
    disable_help_flag = true,
    about = "Print a directory tree with optional metadata and hard-link duplicates",
    long_about = "Recursively list a directory as a tree, optionally showing size, permissions and inode numbers, and group regular files that share an inode."
)]
struct Cli {
    /// Directory to inspect
    #[arg(value_name = "DIRECTORY")]
    dir: PathBuf,

    /// Show inode numbers (also enables duplicate detection)
    #[arg(short = 'i')]
    inode: bool,

    /// Show permission strings
    #[arg(short = 'p')]
    permissions: bool,

    /// Show human readable sizes
    #[arg(short = 's')]
    size: bool,

    /// Content-hash duplicate detection (not implemented, falls back to inode)
    #[arg(short = 'h')]
    hash: bool,

    /// Enable duplicate detection
    #[arg(short = 'd')]
    duplicates: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn walk_config(&self) -> WalkConfig {
        let mut config = WalkConfig::default();
        config.set_show_inode(self.inode);
        config.set_show_permissions(self.permissions);
        config.set_show_size(self.size);
        config.set_detect_duplicates(self.inode || self.hash || self.duplicates);
        if self.hash {
            config.set_identity(IdentityStrategy::ContentHash);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let mut printer = ReportPrinter::stdio();
    printer.set_color(stderr_color(args.no_color));

    match run(&args, &mut printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = printer.fatal(&err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Cli, printer: &mut ReportPrinter<io::Stdout, io::Stderr>) -> Result<()> {
    let config = args.walk_config();

    if args.hash {
        printer.notice("Warning: content-hash detection (-h) is not implemented; grouping by inode instead.")?;
    }

    let mut walker = Walker::new(&config);
    walker.walk(&args.dir, printer)?;
    walker.report(printer)?;

    log::debug!("{} warnings during walk", walker.state().warnings.len());

    Ok(())
}

// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dnfwrap::{Dnf, Options};
use std::io::{self, Write};
use tracing::info;

#[derive(Parser)]
#[command(name = "dnfwrap")]
#[command(author, version, about = "Run DNF package operations", long_about = None)]
struct Cli {
    /// Path to the dnf binary
    #[arg(long, global = true, default_value = "/usr/bin/dnf")]
    dnf_path: String,

    /// Pass --verbose to dnf
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run the transaction as a test (tsflags=test)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Let dnf ask for confirmation instead of passing --assumeyes
    #[arg(long, global = true)]
    no_assume_yes: bool,

    /// Do not relay dnf output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a package
    Install {
        /// Package name
        package: String,
    },
    /// Update a package (updates all if omitted)
    Update {
        /// Package name
        package: Option<String>,
    },
    /// Upgrade the whole system
    Upgrade,
    /// Show dependencies of a package
    Depends {
        /// Package name
        package: String,
    },
    /// Remove a package
    Remove {
        /// Package name
        package: String,
    },
    /// Search repositories for a package
    Search {
        /// Package name
        package: String,
    },
    /// List installed packages
    List {
        /// Print parsed packages as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they stay out of relayed dnf output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let dnf = Dnf::new(&cli.dnf_path);
    let mut stdout = io::stdout();
    let relay = !cli.quiet
        && !matches!(
            cli.command,
            Commands::List { json: true } | Commands::Completions { .. }
        );

    let mut opts = Options::new()
        .verbose(cli.verbose)
        .dry_run(cli.dry_run)
        .not_assume_yes(cli.no_assume_yes);
    if relay {
        opts = opts.output(&mut stdout);
    }

    info!("Using dnf at: {}", cli.dnf_path);

    match cli.command {
        Commands::Install { package } => dnf.install(&package, &mut opts)?,
        Commands::Update { package } => {
            dnf.update(package.as_deref().unwrap_or(""), &mut opts)?
        }
        Commands::Upgrade => dnf.upgrade(&mut opts)?,
        Commands::Depends { package } => dnf.depends(&package, &mut opts)?,
        Commands::Remove { package } => dnf.remove(&package, &mut opts)?,
        Commands::Search { package } => dnf.search(&package, &mut opts)?,
        Commands::List { json: false } => dnf.list(&mut opts)?,
        Commands::List { json: true } => {
            let packages = dnf.installed_packages(&mut opts)?;
            serde_json::to_writer_pretty(&mut stdout, &packages)?;
            writeln!(stdout)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dnfwrap", &mut io::stdout());
        }
    }

    Ok(())
}

// src/client.rs

//! The dnf client façade
//!
//! Every operation builds its subcommand arguments, appends the flags
//! derived from [`Options`], and runs the binary through the shared runner.

use crate::commander::{Commander, SystemCommander, command_line};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::package::{Package, parse_installed};
use crate::subcommand::Subcommand;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Client for a dnf binary
#[derive(Debug, Clone)]
pub struct Dnf<C = SystemCommander> {
    binary_path: PathBuf,
    commander: C,
}

impl Dnf<SystemCommander> {
    /// Create a client that spawns `binary_path` as a real process
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self::with_commander(binary_path, SystemCommander::new())
    }
}

impl<C: Commander> Dnf<C> {
    /// Create a client that runs `binary_path` through `commander`
    pub fn with_commander(binary_path: impl Into<PathBuf>, commander: C) -> Self {
        Self {
            binary_path: binary_path.into(),
            commander,
        }
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn commander(&self) -> &C {
        &self.commander
    }

    /// Install a package
    pub fn install(&self, package: &str, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Install, package, opts).map(drop)
    }

    /// Update a package, or every installed package when `package` is blank
    pub fn update(&self, package: &str, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Update, package, opts).map(drop)
    }

    /// Upgrade the whole system
    pub fn upgrade(&self, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Upgrade, "", opts).map(drop)
    }

    /// Query the dependency list of a package
    pub fn depends(&self, package: &str, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Depends, package, opts).map(drop)
    }

    /// Remove a package
    pub fn remove(&self, package: &str, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Remove, package, opts).map(drop)
    }

    /// Search the repositories for a package
    pub fn search(&self, package: &str, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::Search, package, opts).map(drop)
    }

    /// List installed packages
    pub fn list(&self, opts: &mut Options<'_>) -> Result<()> {
        self.run(Subcommand::List, "", opts).map(drop)
    }

    /// List installed packages and parse the listing
    pub fn installed_packages(&self, opts: &mut Options<'_>) -> Result<Vec<Package>> {
        let stdout = self.run(Subcommand::List, "", opts)?;
        Ok(parse_installed(&stdout))
    }

    /// Full argument vector for `subcommand`: its arguments, then the option flags
    pub fn arguments(
        &self,
        subcommand: Subcommand,
        package: &str,
        opts: &Options<'_>,
    ) -> Result<Vec<String>> {
        let mut args = subcommand.arguments(package)?;
        args.extend(opts.flags());
        Ok(args)
    }

    /// Shared runner; returns the captured stdout
    fn run(&self, subcommand: Subcommand, package: &str, opts: &mut Options<'_>) -> Result<String> {
        let args = self.arguments(subcommand, package, opts)?;

        info!("{}: running dnf {}", subcommand.operation(), subcommand.dnf_command());
        debug!("Invocation: {}", command_line(&self.binary_path, &args));

        self.commander
            .run(&self.binary_path, &args, opts.output.as_deref_mut())
            .map_err(|e| Error::Operation {
                operation: subcommand.operation(),
                source: Box::new(e),
            })
    }
}

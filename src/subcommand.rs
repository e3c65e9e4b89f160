// src/subcommand.rs

//! dnf subcommands and the argument vectors they expand to

use crate::error::{Error, Result};
use std::fmt;

/// One operation mode of the dnf binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Install,
    Update,
    Upgrade,
    Depends,
    Remove,
    Search,
    List,
}

impl Subcommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subcommand::Install => "install",
            Subcommand::Update => "update",
            Subcommand::Upgrade => "upgrade",
            Subcommand::Depends => "depends",
            Subcommand::Remove => "remove",
            Subcommand::Search => "search",
            Subcommand::List => "list",
        }
    }

    /// The subcommand word dnf actually receives
    pub fn dnf_command(&self) -> &'static str {
        match self {
            Subcommand::Depends => "repoquery",
            other => other.as_str(),
        }
    }

    /// Operation name used as error context
    pub fn operation(&self) -> &'static str {
        match self {
            Subcommand::Install => "Install",
            Subcommand::Update => "Update",
            Subcommand::Upgrade => "Upgrade",
            Subcommand::Depends => "Depends",
            Subcommand::Remove => "Remove",
            Subcommand::Search => "Search",
            Subcommand::List => "List",
        }
    }

    /// Whether this subcommand refuses a blank package name
    pub fn requires_package(&self) -> bool {
        matches!(
            self,
            Subcommand::Install | Subcommand::Depends | Subcommand::Remove | Subcommand::Search
        )
    }

    /// Build the arguments that precede the option flags
    ///
    /// `package` is ignored by `upgrade` and `list`. A blank package for
    /// `update` means every installed package.
    pub fn arguments(&self, package: &str) -> Result<Vec<String>> {
        let blank = package.trim().is_empty();

        if blank && self.requires_package() {
            return Err(Error::PackageNameNotSpecified {
                operation: self.operation(),
            });
        }

        let args: Vec<&str> = match self {
            Subcommand::Install => vec!["install", package],
            Subcommand::Update if blank => vec!["update"],
            Subcommand::Update => vec!["update", package],
            Subcommand::Upgrade => vec!["upgrade"],
            Subcommand::Depends => vec!["repoquery", "--deplist", package],
            Subcommand::Remove => vec!["remove", package],
            Subcommand::Search => vec!["search", package],
            Subcommand::List => vec!["list", "installed"],
        };

        Ok(args.into_iter().map(String::from).collect())
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

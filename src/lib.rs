// src/lib.rs

//! dnfwrap
//!
//! Thin client for the DNF package manager. Each operation builds a dnf
//! argument vector, appends flags derived from [`Options`], runs the binary
//! to completion and relays its output to a caller-supplied sink.
//!
//! # Architecture
//!
//! - [`Dnf`]: one method per dnf subcommand, all sharing one runner
//! - [`Options`]: verbose, dry-run and confirmation flags plus the sink
//! - [`Commander`]: injected process launcher, [`SystemCommander`] by default
//!
//! ```no_run
//! use dnfwrap::{Dnf, Options};
//!
//! let dnf = Dnf::new("/usr/bin/dnf");
//! let mut stdout = std::io::stdout();
//! let mut opts = Options::new().dry_run(true).output(&mut stdout);
//! dnf.install("vim-enhanced", &mut opts)?;
//! # Ok::<(), dnfwrap::Error>(())
//! ```

pub mod client;
pub mod commander;
mod error;
pub mod options;
pub mod package;
pub mod subcommand;

pub use client::Dnf;
pub use commander::{Commander, SystemCommander};
pub use error::{Error, Result};
pub use options::Options;
pub use package::Package;
pub use subcommand::Subcommand;

// src/options.rs

//! Per-call options and the flags they translate to

use std::fmt;
use std::io::Write;

/// Configuration for a single dnf invocation
///
/// Every combination of fields is valid. When `output` is set, the child's
/// stdout and stderr are copied into it as they arrive.
#[derive(Default)]
pub struct Options<'a> {
    pub verbose: bool,
    pub dry_run: bool,
    /// Leave out `--assumeyes`, so dnf asks before changing anything
    pub not_assume_yes: bool,
    pub output: Option<&'a mut dyn Write>,
}

impl<'a> Options<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn not_assume_yes(mut self, not_assume_yes: bool) -> Self {
        self.not_assume_yes = not_assume_yes;
        self
    }

    /// Relay subprocess output into `sink`
    pub fn output(mut self, sink: &'a mut dyn Write) -> Self {
        self.output = Some(sink);
        self
    }

    /// Command-line flags for these options
    ///
    /// The order is dry-run, verbose, then assume-yes, matching what dnf's
    /// argument parser expects after the subcommand.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        if self.dry_run {
            flags.push("--setopt".to_string());
            flags.push("tsflags=test".to_string());
        }
        if self.verbose {
            flags.push("--verbose".to_string());
        }
        if !self.not_assume_yes {
            flags.push("--assumeyes".to_string());
        }

        flags
    }
}

impl fmt::Debug for Options<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("verbose", &self.verbose)
            .field("dry_run", &self.dry_run)
            .field("not_assume_yes", &self.not_assume_yes)
            .field("output", &self.output.is_some())
            .finish()
    }
}

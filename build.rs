// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn package_arg(help: &'static str) -> Arg {
    Arg::new("package").required(true).help(help)
}

fn build_cli() -> Command {
    Command::new("dnfwrap")
        .version(env!("CARGO_PKG_VERSION"))
        .author("dnfwrap Contributors")
        .about("Run DNF package operations")
        .subcommand_required(true)
        .arg(
            Arg::new("dnf_path")
                .long("dnf-path")
                .value_name("PATH")
                .default_value("/usr/bin/dnf")
                .global(true)
                .help("Path to the dnf binary"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Pass --verbose to dnf"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Run the transaction as a test (tsflags=test)"),
        )
        .arg(
            Arg::new("no_assume_yes")
                .long("no-assume-yes")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Let dnf ask for confirmation instead of passing --assumeyes"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Do not relay dnf output"),
        )
        .subcommand(
            Command::new("install")
                .about("Install a package")
                .arg(package_arg("Package name")),
        )
        .subcommand(
            Command::new("update")
                .about("Update a package (updates all if omitted)")
                .arg(Arg::new("package").help("Package name")),
        )
        .subcommand(Command::new("upgrade").about("Upgrade the whole system"))
        .subcommand(
            Command::new("depends")
                .about("Show dependencies of a package")
                .arg(package_arg("Package name")),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a package")
                .arg(package_arg("Package name")),
        )
        .subcommand(
            Command::new("search")
                .about("Search repositories for a package")
                .arg(package_arg("Package name")),
        )
        .subcommand(
            Command::new("list").about("List installed packages").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print parsed packages as JSON"),
            ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("dnfwrap.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}

// src/package.rs

//! Packages reported by dnf, and the `list installed` parser

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// A package as reported by dnf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub path: Option<PathBuf>,
    pub arch: Option<String>,
    /// Repository the package was installed from, without dnf's `@` prefix
    pub repository: Option<String>,
}

impl Package {
    /// Create a new Package with only name and version set
    pub fn new(name: String, version: String) -> Self {
        Self {
            name,
            version,
            path: None,
            arch: None,
            repository: None,
        }
    }
}

/// Parse the output of `dnf list installed`
///
/// Entry lines look like `bash.x86_64   5.2.15-3.fc38   @anaconda`. dnf
/// wraps a row after whichever column overflows, so columns are collected
/// across lines until a row has three. A row only starts on a `name.arch`
/// column; headers never do and are skipped. A blank line drops any
/// partial row.
pub fn parse_installed(output: &str) -> Vec<Package> {
    let mut packages = Vec::new();
    let mut row: Vec<&str> = Vec::new();

    for line in output.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.is_empty() {
            row.clear();
            continue;
        }

        if row.len() + columns.len() > 3 {
            if !row.is_empty() {
                debug!("Dropping incomplete row: {}", row.join(" "));
            }
            row.clear();
        }

        if row.is_empty() && (columns.len() > 3 || !is_name_column(columns[0])) {
            continue;
        }

        row.extend(columns);
        if let [name_arch, version, repo] = row.as_slice() {
            packages.push(parse_entry(name_arch, version, repo));
            row.clear();
        }
    }

    debug!("Parsed {} installed packages", packages.len());
    packages
}

/// A name column always carries an `.arch` suffix
fn is_name_column(column: &str) -> bool {
    column.rfind('.').is_some_and(|i| i > 0 && i + 1 < column.len())
}

fn parse_entry(name_arch: &str, version: &str, repo: &str) -> Package {
    let (name, arch) = match name_arch.rsplit_once('.') {
        Some((name, arch)) if !name.is_empty() && !arch.is_empty() => {
            (name.to_string(), Some(arch.to_string()))
        }
        _ => (name_arch.to_string(), None),
    };

    let mut package = Package::new(name, version.to_string());
    package.arch = arch;
    package.repository = Some(repo.trim_start_matches('@').to_string());
    package
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Last metadata expiration check: 0:12:01 ago on Sat 18 Oct 2026 09:00:00 AM UTC.
Installed Packages
bash.x86_64                          5.2.15-3.fc38                @anaconda
glibc-langpack-en.x86_64             2.37-4.fc38                  @updates
python3-dnf-plugin-versionlock.noarch
                                     4.4.2-1.fc38                 @fedora
tzdata.noarch                        2023c-1.fc38                 @fedora
";

    #[test]
    fn test_parse_installed_listing() {
        let packages = parse_installed(LISTING);

        assert_eq!(packages.len(), 4);
        assert_eq!(packages[0].name, "bash");
        assert_eq!(packages[0].version, "5.2.15-3.fc38");
        assert_eq!(packages[0].arch.as_deref(), Some("x86_64"));
        assert_eq!(packages[0].repository.as_deref(), Some("anaconda"));
        assert_eq!(packages[0].path, None);

        assert_eq!(packages[1].name, "glibc-langpack-en");
        assert_eq!(packages[1].repository.as_deref(), Some("updates"));
    }

    #[test]
    fn test_wrapped_name_is_joined() {
        let packages = parse_installed(LISTING);

        let plugin = &packages[2];
        assert_eq!(plugin.name, "python3-dnf-plugin-versionlock");
        assert_eq!(plugin.arch.as_deref(), Some("noarch"));
        assert_eq!(plugin.version, "4.4.2-1.fc38");
        assert_eq!(plugin.repository.as_deref(), Some("fedora"));

        assert_eq!(packages[3].name, "tzdata");
    }

    #[test]
    fn test_wrapped_repo_is_joined() {
        let listing = "\
Installed Packages
kernel-devel.x86_64  6.5.6-300.fc39.very.long.release.string.x86_64_v3
                                 @updates
bash.x86_64  5.2.15-3.fc38  @anaconda
";
        let packages = parse_installed(listing);

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "kernel-devel");
        assert_eq!(
            packages[0].version,
            "6.5.6-300.fc39.very.long.release.string.x86_64_v3"
        );
        assert_eq!(packages[0].repository.as_deref(), Some("updates"));
        assert_eq!(packages[1].name, "bash");
    }

    #[test]
    fn test_incomplete_row_does_not_swallow_next() {
        let listing = "\
orphan.noarch
bash.x86_64  5.2.15-3.fc38  @anaconda
kernel.x86_64  6.5.6-300.fc39

tzdata.noarch  2023c-1.fc38  @fedora
";
        let packages = parse_installed(listing);

        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["bash", "tzdata"]);
    }

    #[test]
    fn test_name_with_dots_splits_on_last() {
        let packages = parse_installed("python3.11.x86_64  3.11.4-1.fc38  @updates\n");
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "python3.11");
        assert_eq!(packages[0].arch.as_deref(), Some("x86_64"));
    }

    #[test]
    fn test_empty_and_header_only_output() {
        assert!(parse_installed("").is_empty());
        assert!(parse_installed("Installed Packages\n").is_empty());
    }

    #[test]
    fn test_package_serializes_to_json() {
        let mut package = Package::new("vim-enhanced".to_string(), "9.0.1677-1.fc38".to_string());
        package.arch = Some("x86_64".to_string());

        let json = serde_json::to_value(&package).unwrap();
        assert_eq!(json["name"], "vim-enhanced");
        assert_eq!(json["arch"], "x86_64");
        assert!(json["repository"].is_null());

        let back: Package = serde_json::from_value(json).unwrap();
        assert_eq!(back, package);
    }
}

//! Architecture enforcement tests.
//!
//! The layering is checked on the source text so violations are caught in
//! CI before they spread:
//!
//! 1. **Thin CLI** - command handlers go through `TrelloService`; only
//!    `commands/mod.rs` builds the client
//! 2. **Plain entities** - `model` never reaches the network
//! 3. **One network boundary** - only the HTTP client and the OAuth flow
//!    use `reqwest`
//! 4. **Explicit configuration** - process environment is read in one place

use std::fs;
use std::path::{Path, PathBuf};

/// Files that may read process environment variables directly.
const ENV_READERS: &[&str] = &["src/config/mod.rs"];

/// Files that may use `reqwest`.
const NETWORK_FILES: &[&str] = &[
    "src/trello/client.rs",
    "src/auth/flow.rs",
    "src/auth/errors.rs",
];

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Source without `#[cfg(test)]` modules and comment lines.
fn production_source(path: &Path) -> String {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    let code = content.split("#[cfg(test)]").next().unwrap_or_default();
    code.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn relative(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn command_handlers_use_the_service() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/cli/commands")) {
        if path.file_name().map(|n| n == "mod.rs").unwrap_or(false) {
            continue;
        }
        let code = production_source(&path);
        for forbidden in ["TrelloClient", "TrelloApi", "reqwest", "trello::Trello"] {
            if code.contains(forbidden) {
                violations.push(format!("{}: uses {}", relative(&path), forbidden));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Command handlers must call TrelloService:\n{}",
        violations.join("\n")
    );
}

#[test]
fn model_has_no_io() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/model")) {
        let code = production_source(&path);
        for forbidden in ["crate::trello", "crate::service", "reqwest", "std::fs"] {
            if code.contains(forbidden) {
                violations.push(format!("{}: uses {}", relative(&path), forbidden));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Entities must stay plain data:\n{}",
        violations.join("\n")
    );
}

#[test]
fn reqwest_only_at_network_boundary() {
    let violations: Vec<String> = rust_files(Path::new("src"))
        .into_iter()
        .filter(|path| !NETWORK_FILES.contains(&relative(path).as_str()))
        .filter(|path| production_source(path).contains("reqwest"))
        .map(|path| relative(&path))
        .collect();

    assert!(
        violations.is_empty(),
        "reqwest used outside the network boundary:\n{}",
        violations.join("\n")
    );
}

#[test]
fn environment_read_only_by_config() {
    let violations: Vec<String> = rust_files(Path::new("src"))
        .into_iter()
        .filter(|path| !ENV_READERS.contains(&relative(path).as_str()))
        .filter(|path| {
            let code = production_source(path);
            code.contains("env::var") || code.contains("env::vars")
        })
        .map(|path| relative(&path))
        .collect();

    assert!(
        violations.is_empty(),
        "Process environment read outside config:\n{}",
        violations.join("\n")
    );
}

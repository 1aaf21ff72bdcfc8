// src/cli/handlers/check.rs

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::core::store::ConfigStore;

/// The tools devkit expects on a development machine.
const REQUIRED_TOOLS: &[&str] = &["docker", "kind", "go"];

/// The main handler for `init check`: probes the PATH for each required
/// tool and records the check in the store. Missing tools are reported but
/// do not fail the command.
pub fn handle(store: &mut ConfigStore) -> Result<()> {
    for tool in REQUIRED_TOOLS {
        match find_in_path(tool) {
            Some(path) => {
                println!("{} Checking {} ({})", "✓".green(), tool, path.display());
            }
            None => {
                println!("{} Checking {}: not found in PATH", "✗".red(), tool);
                log::warn!("Tool '{}' was not found in PATH.", tool);
            }
        }
    }

    store.mark_tools_checked()?;
    println!("\n{}", "Tool check recorded.".green());
    Ok(())
}

/// Searches the PATH for an executable with the given name.
fn find_in_path(tool: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(tool);
        if candidate.is_file() {
            return Some(candidate);
        }
        // Windows executables carry an extension.
        if cfg!(target_os = "windows") {
            let with_exe = dir.join(format!("{}.exe", tool));
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_in_path_locates_a_shell() {
        // Any Unix-ish test machine carries `sh` on PATH.
        if cfg!(unix) {
            assert!(find_in_path("sh").is_some());
        }
    }

    #[test]
    fn find_in_path_misses_nonsense_names() {
        assert!(find_in_path("definitely-not-a-real-tool-name").is_none());
    }
}

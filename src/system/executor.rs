// src/system/executor.rs

use anyhow::{Result, anyhow};
use colored::*;
use rayon::prelude::*;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

use crate::models::EnvironmentConfig;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Environment '{0}' has no path configured.")]
    MissingPath(String),
    #[error("No launch command is known for language '{language}' (environment '{name}').")]
    UnsupportedLanguage { name: String, language: String },
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
}

/// Maps an environment's language to the command line that launches it.
/// An empty language falls back to the Go toolchain.
fn launch_command(environment: &EnvironmentConfig) -> Result<&'static str, ExecutionError> {
    match environment.language.to_lowercase().as_str() {
        "" | "go" | "golang" => Ok("go run main.go"),
        "rust" => Ok("cargo run"),
        "python" => Ok("python main.py"),
        "node" | "javascript" | "typescript" => Ok("npm start"),
        _ => Err(ExecutionError::UnsupportedLanguage {
            name: environment.name.clone(),
            language: environment.language.clone(),
        }),
    }
}

/// Launches an environment's process in its configured path and blocks
/// until it exits, streaming stdout/stderr through to the terminal.
///
/// No timeout or cancellation is applied; the caller waits for the process
/// to finish on its own.
pub fn run_environment(environment: &EnvironmentConfig) -> Result<(), ExecutionError> {
    if environment.path.is_empty() {
        return Err(ExecutionError::MissingPath(environment.name.clone()));
    }

    let command_line = launch_command(environment)?;
    let parts = shlex::split(command_line)
        .ok_or_else(|| ExecutionError::CommandParse(command_line.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Ok(());
    };

    let clean_cwd = dunce::simplified(Path::new(&environment.path));
    println!(
        "{} {} {}",
        "→".blue(),
        command_line.green(),
        format!("({})", clean_cwd.display()).dimmed()
    );

    let status = StdCommand::new(program)
        .args(args)
        .current_dir(clean_cwd)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(command_line.to_string(), e))?;

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus(command_line.to_string()));
    }
    Ok(())
}

/// Runs every environment of the batch concurrently and waits for the whole
/// batch to finish.
///
/// Each task reports its result exactly once, success or failure; the join
/// happens over all tasks and failures are aggregated into one error
/// afterwards, so a failing environment can never desynchronize the
/// completion accounting.
pub fn run_environments(environments: &[EnvironmentConfig]) -> Result<()> {
    println!(
        "{}",
        format!(
            "┌─ Running {} environments in parallel...",
            environments.len()
        )
        .dimmed()
    );
    for environment in environments {
        println!(
            "{} {} {}",
            "├─>".dimmed(),
            environment.name.green(),
            format!("({})", environment.path).dimmed()
        );
    }

    let results: Vec<Result<(), ExecutionError>> = environments
        .par_iter()
        .map(run_environment)
        .collect();

    let mut errors = Vec::new();
    for (environment, result) in environments.iter().zip(results) {
        if let Err(e) = result {
            log::trace!("Environment '{}' failed: {}", environment.name, e);
            errors.push(format!("Environment '{}' failed: {}", environment.name.cyan(), e));
        }
    }

    if !errors.is_empty() {
        return Err(anyhow!(
            "{} environment(s) failed:\n{}",
            errors.len(),
            errors.join("\n")
        ));
    }

    println!("{}", "└─ End batch.".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(language: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            name: "dev".to_string(),
            language: language.to_string(),
            path: "/tmp/dev".to_string(),
            ..EnvironmentConfig::default()
        }
    }

    #[test]
    fn empty_language_falls_back_to_go() {
        assert_eq!(launch_command(&env_with("")).unwrap(), "go run main.go");
    }

    #[test]
    fn known_languages_map_to_their_launchers() {
        assert_eq!(launch_command(&env_with("Go")).unwrap(), "go run main.go");
        assert_eq!(launch_command(&env_with("rust")).unwrap(), "cargo run");
        assert_eq!(launch_command(&env_with("python")).unwrap(), "python main.py");
        assert_eq!(launch_command(&env_with("node")).unwrap(), "npm start");
    }

    #[test]
    fn unknown_languages_are_an_error() {
        let err = launch_command(&env_with("cobol")).unwrap_err();
        assert!(matches!(err, ExecutionError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn running_without_a_path_fails_fast() {
        let environment = EnvironmentConfig {
            name: "dev".to_string(),
            ..EnvironmentConfig::default()
        };
        let err = run_environment(&environment).unwrap_err();
        assert!(matches!(err, ExecutionError::MissingPath(_)));
    }
}

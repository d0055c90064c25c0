//! External command execution

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use launchpad_core::error::{CommandError, Result};

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name, resolved on PATH
    pub program: String,
    /// Arguments, passed verbatim
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace separated command line such as `"npx lerna"`
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).args(parts))
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion and return its trimmed stdout
    ///
    /// A non-zero exit is an error carrying the command's stderr.
    async fn run(&self, command: &CommandSpec) -> Result<String>;
}

/// Runs commands as child processes in a working directory
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
}

impl ProcessRunner {
    /// Create a runner for `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Working directory commands run in
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self), fields(command = %command))]
    async fn run(&self, command: &CommandSpec) -> Result<String> {
        let program = which::which(&command.program)
            .map_err(|_| CommandError::ToolNotFound(command.program.clone()))?;

        let start = Instant::now();
        let output = Command::new(program)
            .args(&command.args)
            .current_dir(&self.cwd)
            .output()
            .await
            .map_err(|e| CommandError::SpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            debug!(duration_ms, code = ?output.status.code(), "command failed");
            return Err(CommandError::Failed {
                command: command.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        info!(duration_ms, "command finished");
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use launchpad_core::error::LaunchpadError;

    /// Records commands and replays canned results in order
    #[derive(Default)]
    pub struct ScriptedRunner {
        calls: Mutex<Vec<String>>,
        results: Mutex<VecDeque<Result<String>>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, result: Result<String>) -> Self {
            self.results.lock().unwrap().push_back(result);
            self
        }

        pub fn fail(self, command: &str, stderr: &str) -> Self {
            self.respond(Err(LaunchpadError::Command(CommandError::Failed {
                command: command.to_string(),
                code: Some(1),
                stderr: stderr.to_string(),
            })))
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, command: &CommandSpec) -> Result<String> {
            self.calls.lock().unwrap().push(command.to_string());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::error::LaunchpadError;
    use tempfile::TempDir;

    #[test]
    fn test_display_quotes_spaced_args() {
        let cmd = CommandSpec::new("npm")
            .arg("version")
            .arg("1.2.3")
            .arg("-m")
            .arg("Bump version to: %s [skip ci]");
        assert_eq!(
            cmd.to_string(),
            "npm version 1.2.3 -m \"Bump version to: %s [skip ci]\""
        );
    }

    #[test]
    fn test_from_command_line() {
        let cmd = CommandSpec::from_command_line("npx lerna").unwrap();
        assert_eq!(cmd.program, "npx");
        assert_eq!(cmd.args, vec!["lerna".to_string()]);
        assert!(CommandSpec::from_command_line("   ").is_none());
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let temp = TempDir::new().unwrap();
        let runner = ProcessRunner::new(temp.path());
        let err = runner
            .run(&CommandSpec::new("launchpad-definitely-not-installed"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchpadError::Command(CommandError::ToolNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_failure() {
        let temp = TempDir::new().unwrap();
        let runner = ProcessRunner::new(temp.path());

        let out = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo hello"]))
            .await
            .unwrap();
        assert_eq!(out, "hello");

        let err = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo boom >&2; exit 3"]))
            .await
            .unwrap_err();
        match err {
            LaunchpadError::Command(CommandError::Failed { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

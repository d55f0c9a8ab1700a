//! External build invocation.
//!
//! Runs the platform build command (normally `pnpm tauri build`) to
//! completion with its combined output buffered in memory. Output is only
//! surfaced when the build fails.

use crate::error::{BuildError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Default build command for a Tauri project
pub const DEFAULT_BUILD_COMMAND: &str = "pnpm tauri build";

/// Default cap on buffered build output (50 MiB)
pub const DEFAULT_OUTPUT_LIMIT: usize = 50 * 1024 * 1024;

/// Number of trailing output lines included in a build failure
const FAILURE_TAIL_LINES: usize = 40;

/// A build command split into program and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Program name or path
    pub program: String,
    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl BuildCommand {
    /// Split a command line on whitespace
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(BuildError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a successful build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Captured stdout
    pub stdout: Vec<u8>,
    /// Captured stderr
    pub stderr: Vec<u8>,
}

/// Runs a build command in a project directory
#[derive(Debug, Clone)]
pub struct Builder {
    command: BuildCommand,
    working_dir: PathBuf,
    output_limit: usize,
}

enum CaptureError {
    Io(std::io::Error),
    Overflow,
}

impl Builder {
    /// Create a builder with the default output cap
    pub fn new(command: BuildCommand, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
            output_limit: DEFAULT_OUTPUT_LIMIT,
        }
    }

    /// Override the output cap
    pub fn with_output_limit(mut self, output_limit: usize) -> Self {
        self.output_limit = output_limit;
        self
    }

    /// Run the build and wait for it to exit.
    ///
    /// Fails if the program cannot be found or spawned, exits non-zero, or
    /// writes more than the output cap across stdout and stderr. On overflow
    /// the child is killed.
    pub async fn run(&self) -> Result<BuildOutput> {
        let command_line = self.command.to_string();
        let program = resolve_program(&self.command.program, &self.working_dir)?;
        log::info!("running build: {} (in {})", command_line, self.working_dir.display());

        let mut child = Command::new(&program)
            .args(&self.command.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BuildError::SpawnFailed {
                command: command_line.clone(),
                source: e,
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(BuildError::SpawnFailed {
                command: command_line,
                source: std::io::Error::other("build output pipes were not captured"),
            }
            .into());
        };

        let used = AtomicUsize::new(0);
        let captured = tokio::try_join!(
            read_capped(stdout, &used, self.output_limit),
            read_capped(stderr, &used, self.output_limit),
        );

        let (stdout, stderr) = match captured {
            Ok(streams) => streams,
            Err(CaptureError::Overflow) => {
                log::warn!("build output exceeded {} bytes, killing build", self.output_limit);
                let _ = child.kill().await;
                return Err(BuildError::OutputOverflow {
                    command: command_line,
                    limit: self.output_limit,
                }
                .into());
            }
            Err(CaptureError::Io(e)) => {
                let _ = child.kill().await;
                return Err(BuildError::SpawnFailed {
                    command: command_line,
                    source: e,
                }
                .into());
            }
        };

        let status = child.wait().await.map_err(|e| BuildError::SpawnFailed {
            command: command_line.clone(),
            source: e,
        })?;

        if !status.success() {
            return Err(BuildError::Failed {
                command: command_line,
                status: status.to_string(),
                output: output_tail(&stdout, &stderr),
            }
            .into());
        }

        log::debug!(
            "build finished: {} bytes stdout, {} bytes stderr",
            stdout.len(),
            stderr.len()
        );
        Ok(BuildOutput { stdout, stderr })
    }
}

fn resolve_program(program: &str, working_dir: &Path) -> Result<PathBuf> {
    which::which_in(program, std::env::var_os("PATH"), working_dir).map_err(|e| {
        BuildError::ProgramNotFound {
            program: program.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

async fn read_capped<R>(
    mut reader: R,
    used: &AtomicUsize,
    limit: usize,
) -> std::result::Result<Vec<u8>, CaptureError>
where
    R: AsyncRead + Unpin,
{
    let mut captured = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).await.map_err(CaptureError::Io)?;
        if n == 0 {
            return Ok(captured);
        }
        if used.fetch_add(n, Ordering::SeqCst) + n > limit {
            return Err(CaptureError::Overflow);
        }
        captured.extend_from_slice(&chunk[..n]);
    }
}

/// Last lines of stdout followed by stderr
fn output_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(stdout),
        String::from_utf8_lossy(stderr)
    );
    let lines: Vec<&str> = combined.lines().collect();
    let start = lines.len().saturating_sub(FAILURE_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn parse_splits_program_and_args() {
        let command = BuildCommand::parse("  pnpm tauri   build ").unwrap();
        assert_eq!(command.program, "pnpm");
        assert_eq!(command.args, vec!["tauri", "build"]);
        assert_eq!(command.to_string(), "pnpm tauri build");
    }

    #[test]
    fn parse_rejects_empty_command() {
        let err = BuildCommand::parse("   ").unwrap_err();
        assert!(matches!(err, ReleaseError::Build(BuildError::EmptyCommand)));
    }

    #[test]
    fn output_tail_keeps_last_lines() {
        let stdout: String = (0..100).map(|i| format!("line {i}\n")).collect();
        let tail = output_tail(stdout.as_bytes(), b"boom\n");
        assert!(tail.ends_with("boom"));
        assert!(!tail.contains("line 0\n"));
        assert_eq!(tail.lines().count(), FAILURE_TAIL_LINES);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_build_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(BuildCommand::parse("echo bundled").unwrap(), dir.path());
        let output = builder.run().await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "bundled");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(BuildCommand::parse("false").unwrap(), dir.path());
        let err = builder.run().await.unwrap_err();
        assert!(matches!(err, ReleaseError::Build(BuildError::Failed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn overflowing_output_kills_build() {
        let dir = tempfile::tempdir().unwrap();
        let builder =
            Builder::new(BuildCommand::parse("yes").unwrap(), dir.path()).with_output_limit(4096);
        let err = builder.run().await.unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Build(BuildError::OutputOverflow { limit: 4096, .. })
        ));
    }

    #[tokio::test]
    async fn unknown_program_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(
            BuildCommand::parse("tauri-release-no-such-tool build").unwrap(),
            dir.path(),
        );
        let err = builder.run().await.unwrap_err();
        assert!(matches!(err, ReleaseError::Build(BuildError::ProgramNotFound { .. })));
    }
}

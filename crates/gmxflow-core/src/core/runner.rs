use super::command::CommandSpec;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Executable '{program}' was not found on PATH")]
    NotFound { program: String },

    #[error("Working directory '{dir}' does not exist", dir = dir.display())]
    WorkingDirNotFound { dir: PathBuf },

    #[error("Failed to run '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Exit status and captured streams of a finished invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Capability to execute one external command with its scripted input.
///
/// Implementations report *how* the process ended through [`CommandOutput`];
/// a non-zero exit status is not an `Err`. Errors are reserved for failures
/// to start or talk to the process at all.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        (**self).run(spec)
    }
}

/// Runs commands as real child processes, blocking until each one exits.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        let io_err = |source: io::Error| RunnerError::Io {
            command: spec.to_string(),
            source,
        };

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // A missing working directory also surfaces as `NotFound` from
        // `spawn`, which would otherwise be blamed on the executable.
        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(RunnerError::WorkingDirNotFound { dir: dir.clone() });
            }
            cmd.current_dir(dir);
        }

        let input = spec.rendered_input();
        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        debug!(command = %spec, "Spawning process");
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RunnerError::NotFound {
                    program: spec.program.clone(),
                }
            } else {
                io_err(e)
            }
        })?;

        // The writer runs on its own thread so a tool that floods stdout
        // before reading its prompts cannot deadlock against us.
        let writer = match (input, child.stdin.take()) {
            (Some(text), Some(mut stdin)) => {
                trace!(input = %text.escape_debug(), "Feeding scripted answers");
                Some(thread::spawn(move || stdin.write_all(text.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output().map_err(io_err)?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                // The tool may exit before reading every answer; its exit
                // status is the authoritative outcome.
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("Process closed stdin before reading all answers");
                }
                Ok(Err(e)) => return Err(io_err(e)),
                Err(_) => {
                    return Err(io_err(io::Error::other("stdin writer thread panicked")));
                }
            }
        }

        debug!(command = %spec, code = ?output.status.code(), "Process exited");
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

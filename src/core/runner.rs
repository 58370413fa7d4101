//! External process execution.
//!
//! [`ProcessRunner`] collects a program, a working directory and an argument list,
//! then runs the program once per call. Every command line is logged at `info` and
//! every captured output line at `debug`.

use crate::core::error::{GitPulseError, Result};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Exit code and captured text of a finished process
///
/// `text` is stdout when the process exited with 0 and stderr otherwise, with
/// trailing whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub text: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, text: impl Into<String>) -> Self {
        Self {
            exit_code,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(0, text)
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    working_directory: PathBuf,
    arguments: Vec<String>,
    environment: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_directory: working_directory.into(),
            arguments: Vec::new(),
            environment: Vec::new(),
        }
    }

    pub fn argument(&mut self, argument: impl Into<String>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn arguments<I, S>(&mut self, arguments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.environment.push((key.into(), value.into()));
        self
    }

    pub fn environment(&self) -> &[(String, String)] {
        &self.environment
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn args(&self) -> &[String] {
        &self.arguments
    }

    /// Arguments joined for display, whitespace-containing ones wrapped in quotes
    pub fn command_line(&self) -> String {
        self.arguments
            .iter()
            .map(|argument| quote(argument))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, capturing both output streams
    pub fn execute(&self) -> Result<ProcessOutput> {
        self.log_invocation();

        let mut child = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GitPulseError::process_spawn(&self.program, e))?;

        // Drain stderr on its own thread so a full pipe can't stall the child.
        let stderr_reader = child.stderr.take().map(|stderr| thread::spawn(move || drain(stderr)));
        let stdout = match child.stdout.take() {
            Some(stdout) => drain(stdout)?,
            None => String::new(),
        };
        let stderr = match stderr_reader {
            Some(reader) => reader
                .join()
                .map_err(|_| io::Error::other("stderr reader panicked"))??,
            None => String::new(),
        };

        let status = child.wait()?;
        let exit_code = status.code().unwrap_or(-1);
        let text = if exit_code == 0 { stdout } else { stderr };

        Ok(ProcessOutput::new(exit_code, text.trim_end()))
    }

    /// Start the process and return without waiting for it
    pub fn execute_async(&self) -> Result<()> {
        self.log_invocation();

        let mut child = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| GitPulseError::process_spawn(&self.program, e))?;

        let program = self.program.clone();
        thread::spawn(move || match child.wait() {
            Ok(status) => log::debug!("{} exited with {status}", program.display()),
            Err(e) => log::debug!("Failed to wait for {}: {e}", program.display()),
        });
        Ok(())
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.arguments)
            .envs(self.environment.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.working_directory);
        command
    }

    fn log_invocation(&self) {
        log::info!(
            "** (in {}) {} {}",
            self.working_directory.display(),
            self.program.display(),
            self.command_line()
        );
    }
}

impl fmt::Display for ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program.display(), self.command_line())
    }
}

fn quote(argument: &str) -> Cow<'_, str> {
    if argument.chars().any(char::is_whitespace) {
        Cow::Owned(format!("\"{argument}\""))
    } else {
        Cow::Borrowed(argument)
    }
}

fn drain<R: Read>(stream: R) -> io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut captured = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        log::debug!("{}", text.trim_end());
        captured.push_str(&text);
    }

    Ok(captured)
}

use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::errors::JarshipError;

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments and an optional
/// stdin payload (used to hand a passphrase to `gpg` without putting it on
/// the command line).
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bytes written to the child's stdin before waiting for it to exit.
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// The program name this builder will run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, JarshipError> {
        tracing::debug!("Running {} {}", self.program, self.args.join(" "));
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        let Some(ref input) = self.stdin else {
            return cmd.output().map_err(JarshipError::from);
        };

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn()?;
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(input)?;
        }
        child.wait_with_output().map_err(JarshipError::from)
    }
}

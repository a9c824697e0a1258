//! Regenerating signatures before a comparison.
//!
//! The comparison engine only ever sees files on disk. A generator is
//! whatever produces the generated side: usually the project's own
//! signature tooling, run as an external command.

use crate::errors::{Result, SigCompareError};
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub trait SignatureGenerator {
    /// Produce the generated signature files. Returns once they are on disk.
    fn generate(&self) -> Result<()>;
}

/// Runs a command line through the platform shell.
///
/// The command's stdout is forwarded to stderr so the report on stdout
/// stays machine readable.
#[derive(Debug, Clone)]
pub struct ShellCommandGenerator {
    command: String,
}

impl ShellCommandGenerator {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn shell(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl SignatureGenerator for ShellCommandGenerator {
    fn generate(&self) -> Result<()> {
        info!(command = %self.command, "running signature generator");
        let output = self
            .shell()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SigCompareError::Generator(format!("`{}`: {e}", self.command)))?;

        if !output.stdout.is_empty() {
            eprint!("{}", String::from_utf8_lossy(&output.stdout));
        }
        if !output.stderr.is_empty() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
        }

        if output.status.success() {
            debug!(command = %self.command, "signature generator finished");
            Ok(())
        } else {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            Err(SigCompareError::Generator(format!(
                "`{}` exited with status {code}",
                self.command
            )))
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SumatraPDF gateway — prints a PDF by spawning the SumatraPDF command line.
//
//   SumatraPDF.exe -print-to "<printer>" -silent <file>
//   SumatraPDF.exe -print-to-default     -silent <file>
//
// The executable is looked up on every call (configured install locations
// first, then PATH), so installing the helper does not need a restart.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use fastprint_core::AppConfig;
use fastprint_core::error::{FastPrintError, Result};
use fastprint_core::types::{PrintJobResult, file_name_of};

use crate::gateway::PrintHelperGateway;

/// Runs SumatraPDF once per document.
#[derive(Debug, Clone)]
pub struct SumatraGateway {
    /// Install locations probed in order.
    candidates: Vec<PathBuf>,
    /// Program name for the PATH fallback.
    program: String,
    /// Upper bound on a single helper run.
    timeout: Duration,
}

impl SumatraGateway {
    pub fn new(candidates: Vec<PathBuf>, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            candidates,
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.helper_candidates.clone(),
            config.helper_program.clone(),
            Duration::from_secs(config.print_timeout_secs),
        )
    }

    /// Resolve the helper executable.
    ///
    /// # Errors
    ///
    /// `HelperNotFound` when no candidate exists and PATH has no match.
    pub fn locate_helper(&self) -> Result<PathBuf> {
        if let Some(found) = self.candidates.iter().find(|c| c.is_file()) {
            return Ok(found.clone());
        }
        which::which(&self.program).map_err(|e| {
            debug!(program = %self.program, error = %e, "PATH lookup failed");
            FastPrintError::HelperNotFound(self.program.clone())
        })
    }

    /// Print `document` and return the success message.
    ///
    /// # Errors
    ///
    /// `FileMissing`, `HelperNotFound`, `HelperTimeout`, or
    /// `HelperExecution` carrying the helper's stderr (stdout when stderr is
    /// empty).
    #[instrument(skip(self), fields(document = %document.display()))]
    pub async fn run(&self, document: &Path, printer: Option<&str>) -> Result<String> {
        if !document.exists() {
            return Err(FastPrintError::FileMissing(document.display().to_string()));
        }

        let helper = self.locate_helper()?;
        let args = helper_args(document, printer);
        debug!(helper = %helper.display(), ?args, "spawning print helper");

        let mut command = Command::new(&helper);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| FastPrintError::HelperExecution(e.to_string()))?,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "print helper timed out");
                return Err(FastPrintError::HelperTimeout(self.timeout.as_secs()));
            }
        };

        if output.status.success() {
            info!("document sent to printer");
            return Ok(format!("sent to printer: {}", file_name_of(document)));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("unknown error")
            .to_owned();
        warn!(status = ?output.status.code(), %message, "print helper failed");
        Err(FastPrintError::HelperExecution(message))
    }
}

impl PrintHelperGateway for SumatraGateway {
    async fn print_one(&self, document: &Path, printer: Option<&str>) -> PrintJobResult {
        let name = file_name_of(document);
        match self.run(document, printer).await {
            Ok(message) => PrintJobResult::printed(name, message),
            Err(e) => PrintJobResult::failed(name, e.to_string()),
        }
    }
}

/// Command-line arguments for a silent print.
pub fn helper_args(document: &Path, printer: Option<&str>) -> Vec<OsString> {
    let mut args: Vec<OsString> = match printer {
        Some(name) => vec!["-print-to".into(), name.into()],
        None => vec!["-print-to-default".into()],
    };
    args.push("-silent".into());
    args.push(document.as_os_str().to_owned());
    args
}

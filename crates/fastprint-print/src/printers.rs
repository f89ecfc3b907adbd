// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Installed-printer discovery via the platform's own tooling.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use fastprint_core::types::PrinterList;

const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shown when the host's printers cannot be listed.
pub const PLACEHOLDER_PRINTER: &str = "Default printer";

/// List the host's printers, falling back to a single placeholder entry.
///
/// `default` is the configured default printer and is passed through as is.
pub async fn list_printers(default: Option<String>) -> PrinterList {
    let printers = match query_printers().await {
        Some(found) if !found.is_empty() => found,
        _ => vec![PLACEHOLDER_PRINTER.to_owned()],
    };
    PrinterList { printers, default }
}

async fn query_printers() -> Option<Vec<String>> {
    const POWERSHELL_ARGS: &[&str] = &["-Command", "Get-Printer | Select-Object -ExpandProperty Name"];
    const LPSTAT_ARGS: &[&str] = &["-p"];

    let windows = cfg!(windows);
    let program = if windows { "powershell" } else { "lpstat" };
    let args = if windows { POWERSHELL_ARGS } else { LPSTAT_ARGS };

    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null()).kill_on_drop(true);

    let output = match tokio::time::timeout(LIST_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!(program, error = %e, "printer listing unavailable");
            return None;
        }
        Err(_) => {
            warn!(program, "printer listing timed out");
            return None;
        }
    };

    if !output.status.success() {
        debug!(program, status = ?output.status.code(), "printer listing failed");
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(if windows {
        parse_powershell(&stdout)
    } else {
        parse_lpstat(&stdout)
    })
}

/// One printer name per non-blank line.
pub fn parse_powershell(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Second token of every `printer <name> ...` line.
pub fn parse_lpstat(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|l| l.starts_with("printer "))
        .filter_map(|l| l.split_whitespace().nth(1))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lpstat_output() {
        let out = "printer HP_LaserJet is idle.  enabled since Mon 01 Jan\n\
                   \tDescription: office\n\
                   printer Plotter_A0 disabled since Tue\n";
        assert_eq!(parse_lpstat(out), vec!["HP_LaserJet", "Plotter_A0"]);
    }

    #[test]
    fn lpstat_without_printers() {
        assert!(parse_lpstat("scheduler is not running\n").is_empty());
        assert!(parse_lpstat("").is_empty());
    }

    #[test]
    fn powershell_output() {
        let out = "HP LaserJet 400\r\n\r\nMicrosoft Print to PDF\r\n  \r\n";
        assert_eq!(
            parse_powershell(out),
            vec!["HP LaserJet 400", "Microsoft Print to PDF"]
        );
    }

    #[tokio::test]
    async fn listing_never_comes_back_empty() {
        let list = list_printers(Some("Plotter".into())).await;
        assert!(!list.printers.is_empty());
        assert_eq!(list.default.as_deref(), Some("Plotter"));
    }
}

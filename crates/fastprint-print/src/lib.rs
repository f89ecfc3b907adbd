// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FastPrint Print — drives the external print helper.
//
// Rendering and spooling belong to the helper (SumatraPDF); this crate only
// locates it, runs it once per document under a timeout, and accounts for
// what printed.

pub mod gateway;
pub mod orchestrator;
pub mod printers;
pub mod sumatra;

pub use gateway::PrintHelperGateway;
pub use orchestrator::{DocumentSelection, PrintOrchestrator};
pub use printers::list_printers;
pub use sumatra::SumatraGateway;

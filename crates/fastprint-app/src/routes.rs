// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request routing for the JSON API.

use serde::Deserialize;
use tracing::debug;

use fastprint_core::error::{FastPrintError, Result};

use crate::http::{HttpRequest, HttpResponse};
use crate::services::app_services::AppServices;

const DEFAULT_LOG_LIMIT: u32 = 100;

const KNOWN_PATHS: &[&str] = &[
    "/api/printers",
    "/api/list-pdfs",
    "/api/print",
    "/api/search",
    "/api/browse",
    "/api/logs",
];

#[derive(Debug, Deserialize)]
struct FolderRequest {
    path: String,
}

#[derive(Debug, Deserialize)]
struct PrintRequest {
    folder_path: String,
    #[serde(default)]
    printer: Option<String>,
    #[serde(default)]
    selected_files: Option<Vec<String>>,
}

/// Route `request` to its handler and render the result.
pub async fn dispatch(services: &AppServices, request: &HttpRequest) -> HttpResponse {
    let method = request.method.as_str();
    let path = request.path.as_str();

    let result = match (method, path) {
        ("GET", "/api/printers") => Ok(HttpResponse::ok(&services.printers().await)),
        ("POST", "/api/list-pdfs") => list_pdfs(services, request).await,
        ("POST", "/api/print") => print(services, request).await,
        ("GET", "/api/search") => {
            let query = request.query_param("query").unwrap_or_default().to_owned();
            services.search(query).await.map(|o| HttpResponse::ok(&o))
        }
        ("GET", "/api/browse") => {
            let target = request.query_param("path").unwrap_or_default().to_owned();
            services.browse(target).await.map(|l| HttpResponse::ok(&l))
        }
        ("GET", "/api/logs") => logs(services, request).await,
        ("OPTIONS", p) if KNOWN_PATHS.contains(&p) => Ok(HttpResponse::no_content()),
        (_, p) if KNOWN_PATHS.contains(&p) => {
            Ok(HttpResponse::detail(405, "method not allowed"))
        }
        _ => Ok(HttpResponse::detail(404, "not found")),
    };

    match result {
        Ok(response) => response,
        Err(e) => {
            debug!(method, path, error = %e, "request failed");
            HttpResponse::from_error(&e)
        }
    }
}

async fn list_pdfs(services: &AppServices, request: &HttpRequest) -> Result<HttpResponse> {
    let body: FolderRequest = request.json()?;
    let listing = services.list_documents(body.path).await?;
    Ok(HttpResponse::ok(&listing))
}

async fn print(services: &AppServices, request: &HttpRequest) -> Result<HttpResponse> {
    let body: PrintRequest = request.json()?;
    let credential = request.bearer_token().map(str::to_owned);
    let outcome = services
        .print(body.folder_path, body.printer, body.selected_files, credential)
        .await?;
    Ok(HttpResponse::ok(&outcome))
}

async fn logs(services: &AppServices, request: &HttpRequest) -> Result<HttpResponse> {
    let raw_limit = request
        .query_param("limit")
        .or_else(|| request.query_param("limite"));
    let limit = match raw_limit {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| FastPrintError::Validation(format!("invalid limit: {raw}")))?,
        None => DEFAULT_LOG_LIMIT,
    };
    Ok(HttpResponse::ok(&services.logs(limit).await?))
}

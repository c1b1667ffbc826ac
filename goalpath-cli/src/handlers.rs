//! Command bodies. Each returns a [`Reply`]; only unexpected failures in the
//! CLI plumbing itself escape as `anyhow` errors.

use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};
use goalpath_core::{project_with_policy, CutPolicy, ExpenseSummary, GoalRequest};
use goalpath_ingest::{ingest_file, FailureClass};
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::reply::Reply;
use crate::staging::{stage_upload, upload_size};

pub const INVALID_FILE_MESSAGE: &str =
    "Invalid file format or data. Ensure it has Date, Expense, and Type of Expense columns.";

/// Size-check, stage and ingest one statement.
pub fn ingest_upload(source: &Path, max_upload_bytes: u64) -> Result<ExpenseSummary, Reply> {
    info!(file = %source.display(), "starting file upload");

    let size = upload_size(source).map_err(|e| Reply::internal(format!("Processing failed: {e:#}")))?;
    if size > max_upload_bytes {
        warn!(size, max_upload_bytes, "upload rejected: too large");
        return Err(Reply::invalid(format!(
            "File too large! Max size is {}MB.",
            max_upload_bytes / (1024 * 1024)
        )));
    }

    let staged = stage_upload(source).map_err(|e| Reply::internal(format!("Processing failed: {e:#}")))?;

    match ingest_file(staged.path()) {
        Ok(summary) => {
            info!("file processed successfully");
            Ok(summary)
        }
        Err(e) => match e.class() {
            FailureClass::InvalidInput => {
                warn!(error = %e, "invalid upload");
                Err(Reply::invalid(INVALID_FILE_MESSAGE))
            }
            FailureClass::Internal => {
                error!(error = %e, "processing error");
                Err(Reply::internal(format!("Processing failed: {e}")))
            }
        },
    }
}

pub fn ingest(source: &Path, max_upload_bytes: u64) -> Result<Reply> {
    Ok(match ingest_upload(source, max_upload_bytes) {
        Ok(summary) => Reply::ok(serde_json::to_value(&summary).context("serialize summary")?),
        Err(reply) => reply,
    })
}

/// Project a JSON goal request read from `request` or stdin.
pub fn predict(request: Option<&Path>, policy: &CutPolicy) -> Result<Reply> {
    let raw = match request {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("read request from stdin")?;
            s
        }
    };
    Ok(predict_json(&raw, policy))
}

pub fn predict_json(raw: &str, policy: &CutPolicy) -> Reply {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => return Reply::invalid(format!("Invalid input: {e}")),
    };
    match GoalRequest::from_json(&value) {
        Ok(request) => Reply::ok(project_with_policy(&request, policy).to_json()),
        Err(e) => {
            warn!(error = %e, "rejected goal request");
            Reply::invalid(format!("Invalid input: {e}"))
        }
    }
}

/// Goal parameters supplied on the command line for `plan`.
#[derive(Debug, Clone)]
pub struct PlanArgs {
    pub monthly_income: f64,
    pub goal_type: String,
    pub goal_cost: f64,
    pub months: Vec<String>,
}

/// Ingest a statement and project a goal against it in one step.
pub fn plan(source: &Path, args: &PlanArgs, max_upload_bytes: u64, policy: &CutPolicy) -> Result<Reply> {
    let summary = match ingest_upload(source, max_upload_bytes) {
        Ok(s) => s,
        Err(reply) => return Ok(reply),
    };

    let months = (!args.months.is_empty()).then_some(args.months.as_slice());
    let request = GoalRequest::from_summary(
        &summary,
        args.monthly_income,
        args.goal_type.clone(),
        args.goal_cost,
        months,
    );
    let projection = project_with_policy(&request, policy);

    Ok(Reply::ok(json!({
        "summary": serde_json::to_value(&summary).context("serialize summary")?,
        "projection": projection.to_json(),
    })))
}

/// Ingest several statements, at most `workers` at a time. Entries come back
/// in input order.
pub async fn batch(files: Vec<PathBuf>, workers: usize, max_upload_bytes: u64) -> Result<Reply> {
    let entries: Vec<Value> = stream::iter(files)
        .map(move |file| async move {
            let label = file.display().to_string();
            let joined = tokio::task::spawn_blocking(move || ingest_upload(&file, max_upload_bytes)).await;
            match joined {
                Ok(Ok(summary)) => json!({ "file": label, "summary": summary }),
                Ok(Err(reply)) => json!({ "file": label, "error": reply.error_message() }),
                Err(e) => {
                    error!(file = %label, error = %e, "ingest task failed");
                    json!({ "file": label, "error": format!("Processing failed: {e}") })
                }
            }
        })
        .buffered(workers.max(1))
        .collect()
        .await;

    Ok(Reply::ok(Value::Array(entries)))
}

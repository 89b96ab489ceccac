//! Observability: tracing init and the execution audit log.
//!
//! Uses config::ObservabilityConfig for VENVCTL_QUIET, VENVCTL_LOG_LEVEL, VENVCTL_AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup.
/// `RUST_LOG` wins over `VENVCTL_LOG_LEVEL`; `VENVCTL_QUIET=1` keeps only WARN and above.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "venvctl=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    // Logs go to stderr so they never interleave with a driven child's stdout.
    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

/// Audit log target from the cached config; `None` disables auditing.
fn audit_path() -> Option<&'static Path> {
    crate::config::ObservabilityConfig::from_env()
        .audit_log
        .as_deref()
        .map(Path::new)
}

/// Append one record as a JSON line, creating the log's directory on demand. Best-effort.
fn append_record(path: &Path, record: &serde_json::Value) {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{}", record);
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn started_record(cmd: &str, mode: &str) -> serde_json::Value {
    json!({
        "ts": now(),
        "event": "execution_started",
        "cmd": cmd,
        "mode": mode,
    })
}

fn completed_record(cmd: &str, exit_code: i32, duration_ms: u64) -> serde_json::Value {
    json!({
        "ts": now(),
        "event": "execution_completed",
        "cmd": cmd,
        "exit_code": exit_code,
        "duration_ms": duration_ms,
        "success": exit_code == 0,
    })
}

/// Audit: execution_started (right before spawn). `mode` is "shell" or "capture".
pub fn audit_execution_started(cmd: &str, mode: &str) {
    if let Some(path) = audit_path() {
        append_record(path, &started_record(cmd, mode));
    }
}

/// Audit: execution_completed. Indeterminate exits are recorded with the fallback code.
pub fn audit_execution_completed(cmd: &str, exit_code: i32, duration_ms: u64) {
    if let Some(path) = audit_path() {
        append_record(path, &completed_record(cmd, exit_code, duration_ms));
    }
}

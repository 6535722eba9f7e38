//! Diagnostics for the bootstrapper.
//!
//! Everything goes to stderr: stdout belongs to the launched server's
//! protocol traffic.

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::Path;

use colored::*;

use crate::config::is_truthy;

/// Environment variable that enables machine-readable JSON logs when set to "1" or "true".
const MACHINE_LOG_ENV: &str = "NATIV_MCP_MACHINE_LOG";

pub fn init_logging() {
    // Internal logs are opt-in via RUST_LOG. UI output remains separate.
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_level(log::LevelFilter::Warn);
    }
    let _ = builder.try_init();

    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
}

fn machine_log_enabled() -> bool {
    is_truthy(std::env::var(MACHINE_LOG_ENV).ok().as_deref())
}

fn emit_machine_event(kind: &str, data: serde_json::Value) {
    if !machine_log_enabled() {
        return;
    }

    let event = serde_json::json!({
        "kind": kind,
        "data": data,
    });

    if let Ok(line) = serde_json::to_string(&event) {
        eprintln!("{line}");
    }
}

/// Progress notice, e.g. while installing uv.
pub fn notice(msg: impl AsRef<str>) {
    let raw = msg.as_ref();
    eprintln!("{} {}", "●".cyan(), raw);
    emit_machine_event("notice", serde_json::json!({ "message": raw }));
}

/// Fatal diagnostic. Multi-line messages keep their layout.
pub fn error(msg: impl AsRef<str>) {
    let raw = msg.as_ref();
    eprintln!("{} {}", "✗".red().bold(), raw.red());
    emit_machine_event("error", serde_json::json!({ "message": raw }));
}

/// Machine-log only: the human stream stays quiet on a normal launch.
pub fn launching(program: &Path, args: &[OsString]) {
    emit_machine_event(
        "launch",
        serde_json::json!({
            "program": program.to_string_lossy(),
            "args": args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>(),
        }),
    );
}

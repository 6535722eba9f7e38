#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Mutex, OnceLock};

// Writing a script while another test thread forks can leave the file busy
// (ETXTBSY) at exec time, so script setup and spawning are serialized.
static SPAWN_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

const MANUAL_INSTALL: &str = "curl -LsSf https://astral.sh/uv/install.sh | sh";

/// Run the bootstrapper with `bin` as the only PATH entry and a scratch HOME.
fn run_bootstrapper(bin: &Path, configure: impl FnOnce(&mut Command)) -> Output {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nativ-mcp"));
    cmd.env_clear()
        .env("PATH", bin)
        .env("HOME", home.path())
        .env("NATIV_MCP_NO_INSTALL", "1");
    configure(&mut cmd);
    cmd.output().unwrap()
}

/// Run the bootstrapper with a fake `uvx` on PATH.
fn run_with_uvx(body: &str, configure: impl FnOnce(&mut Command)) -> Output {
    let _lock = SPAWN_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
    let bin = tempfile::tempdir().unwrap();
    write_script(bin.path(), "uvx", body);
    run_bootstrapper(bin.path(), configure)
}

/// Run the bootstrapper with nothing on PATH and install disabled.
fn run_without_uv(configure: impl FnOnce(&mut Command)) -> Output {
    let _lock = SPAWN_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
    let bin = tempfile::tempdir().unwrap();
    run_bootstrapper(bin.path(), configure)
}

/// The system probe directories are always searched; a host uv would launch.
fn host_has_uv() -> bool {
    ["/opt/homebrew/bin", "/usr/local/bin"].iter().any(|dir| {
        ["uvx", "uv"]
            .iter()
            .any(|name| Path::new(dir).join(name).exists())
    })
}

#[test]
fn exit_codes_are_mirrored() {
    for code in [0, 1, 7, 255] {
        let out = run_with_uvx(&format!("exit {code}"), |_| {});
        assert_eq!(out.status.code(), Some(code));
    }
}

#[test]
fn signaled_child_exits_one() {
    let out = run_with_uvx("kill -KILL $$", |_| {});
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn stdout_is_relayed_untouched() {
    let out = run_with_uvx("echo hello-from-child", |_| {});
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hello-from-child\n");
    assert!(out.stderr.is_empty());
}

#[test]
fn environment_reaches_child_unmodified() {
    let body = r#"[ "$NATIV_API_KEY" = "sk-test 123" ] || exit 3
[ "$NATIV_API_URL" = "http://localhost:8000/" ] || exit 4
[ "$UNRELATED_SETTING" = "a=b;c" ] || exit 5
exit 0"#;
    let out = run_with_uvx(body, |cmd| {
        cmd.env("NATIV_API_KEY", "sk-test 123")
            .env("NATIV_API_URL", "http://localhost:8000/")
            .env("UNRELATED_SETTING", "a=b;c");
    });
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn package_and_arguments_are_forwarded() {
    let out_dir = tempfile::tempdir().unwrap();
    let args_file = out_dir.path().join("args.txt");
    let out = run_with_uvx(r#"printf '%s\n' "$@" > "$ARGS_OUT""#, |cmd| {
        cmd.env("ARGS_OUT", &args_file)
            .env("NATIV_MCP_PACKAGE", "nativ-mcp==0.1.0")
            .arg("--transport")
            .arg("stdio");
    });
    assert!(out.status.success());

    let recorded = std::fs::read_to_string(&args_file).unwrap();
    assert_eq!(recorded, "nativ-mcp==0.1.0\n--transport\nstdio\n");
}

#[test]
fn missing_uv_with_install_disabled_prints_manual_command() {
    if host_has_uv() {
        eprintln!("skipping: uv is installed in a system directory");
        return;
    }

    let out = run_without_uv(|_| {});
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains(MANUAL_INSTALL), "stderr was: {stderr}");
    assert!(stderr.contains("NATIV_MCP_NO_INSTALL"));
}

#[test]
fn machine_log_emits_json_error_event() {
    if host_has_uv() {
        eprintln!("skipping: uv is installed in a system directory");
        return;
    }

    let out = run_without_uv(|cmd| {
        cmd.env("NATIV_MCP_MACHINE_LOG", "1");
    });
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    let event = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|event| event["kind"] == "error")
        .unwrap_or_else(|| panic!("no JSON error event in stderr: {stderr}"));
    let message = event["data"]["message"].as_str().unwrap();
    assert!(message.contains(MANUAL_INSTALL), "message was: {message}");
}

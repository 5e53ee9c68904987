//! End-to-end tests for the `wboard` binary.
//!
//! Every test points XDG_CONFIG_HOME and XDG_DATA_HOME at its own temp dir,
//! so runs are isolated from each other and from the user's dashboard.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

const WBOARD_BIN: &str = env!("CARGO_BIN_EXE_wboard");

fn wboard(home: &TempDir) -> Command {
    let mut cmd = Command::new(WBOARD_BIN);
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("WBOARD_LOG", "off")
        .env_remove("WBOARD_SYNC_TOKEN");
    cmd
}

fn data_file(home: &TempDir, key: &str) -> std::path::PathBuf {
    home.path()
        .join("data")
        .join("widget-board")
        .join(format!("{key}.json"))
}

fn write_config(home: &TempDir, content: &str) {
    let dir = home.path().join("config").join("widget-board");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(dir.join("config.toml"), content).expect("config file");
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("stored file");
    serde_json::from_str(&content).expect("stored json")
}

// ---------------------------------------------------------------------------
// Dashboard commands
// ---------------------------------------------------------------------------

#[test]
fn test_show_first_run_lists_defaults_without_writing() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Breakpoint: lg (3 columns)"))
        .stdout(predicate::str::contains("music-1"))
        .stdout(predicate::str::contains("health-1"));
    assert!(!data_file(&home, "dashboard-widgets").exists());
    assert!(!data_file(&home, "dashboard-layouts").exists());
}

#[test]
fn test_show_narrow_width_uses_single_column() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["show", "--width", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Breakpoint: xs (1 columns)"))
        .stdout(predicate::str::contains("0,10 1x2"));
}

#[test]
fn test_types_lists_catalog() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("meditation-timer"))
        .stdout(predicate::str::contains("calendar"));
}

#[test]
fn test_add_persists_widget_and_placements() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["add", "notes"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Added notes-"));

    let widgets = read_json(&data_file(&home, "dashboard-widgets"));
    let widgets = widgets.as_array().expect("widget list");
    assert_eq!(widgets.len(), 7);
    let added = &widgets[6];
    assert_eq!(added["type"], "notes");
    assert_eq!(added["title"], "Journal");

    let layouts = read_json(&data_file(&home, "dashboard-layouts"));
    for bp in ["lg", "md", "sm", "xs"] {
        let items = layouts[bp].as_array().expect("breakpoint items");
        assert_eq!(items.len(), 7, "{bp}");
        assert!(items.iter().any(|item| item["i"] == added["id"]), "{bp}");
    }
}

#[test]
fn test_add_unknown_type_fails() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["add", "weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown widget type"));
    assert!(!data_file(&home, "dashboard-widgets").exists());
}

#[test]
fn test_remove_then_show() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["remove", "sleep-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed sleep-1"));
    wboard(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("sleep-1").not());
}

#[test]
fn test_remove_unknown_widget_fails() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["remove", "nope-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no widget with id"));
}

#[test]
fn test_place_without_movement_is_a_no_op() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["place", "lg", "music-1", "--x", "0", "--y", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout unchanged"));
    assert!(!data_file(&home, "dashboard-layouts").exists());
}

#[test]
fn test_place_drag_down_swaps_with_item_below() {
    let home = TempDir::new().expect("tempdir");
    // Dropped far below the grid, music-1 sorts after sleep-1 and lands
    // directly under it.
    wboard(&home)
        .args(["place", "lg", "music-1", "--x", "0", "--y", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed music-1 at 0,2 1x2 (lg)"));
    let layouts = read_json(&data_file(&home, "dashboard-layouts"));
    let sleep = layouts["lg"]
        .as_array()
        .expect("lg items")
        .iter()
        .find(|item| item["i"] == "sleep-1")
        .expect("sleep-1");
    assert_eq!(sleep["y"], 0);
}

#[test]
fn test_place_resize_pushes_items_down() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["place", "lg", "music-1", "--x", "0", "--y", "0", "--h", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed music-1 at 0,0 1x4 (lg)"));
    let layouts = read_json(&data_file(&home, "dashboard-layouts"));
    let sleep = layouts["lg"]
        .as_array()
        .expect("lg items")
        .iter()
        .find(|item| item["i"] == "sleep-1")
        .expect("sleep-1");
    assert_eq!(sleep["y"], 4);
}

#[test]
fn test_place_huge_height_is_capped() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["place", "lg", "music-1", "--x", "0", "--y", "0", "--h", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed music-1 at 0,0 1x1000 (lg)"));
}

#[test]
fn test_theme_set_and_show() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["theme", "--primary", "rose", "--pattern", "grid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--primary: 330 70% 60%"));
    wboard(&home)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("primary: rose"))
        .stdout(predicate::str::contains("pattern: grid"));
}

#[test]
fn test_theme_unknown_color_fails() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["theme", "--primary", "chartreuse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color"));
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[test]
fn test_sync_without_endpoint_fails() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no endpoint configured"));
}

/// Accept one request, capture its body, answer with `status_line`.
fn one_shot_server(status_line: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("header line");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).expect("body");
        let mut stream = stream;
        write!(
            stream,
            "{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        )
        .expect("response");
        String::from_utf8(body).expect("utf8 body")
    });
    (format!("http://{addr}/dashboard"), handle)
}

#[test]
fn test_sync_uploads_snapshot_and_records_time() {
    let home = TempDir::new().expect("tempdir");
    let (endpoint, server) = one_shot_server("HTTP/1.1 204 No Content");
    write_config(&home, &format!("[sync]\nendpoint = \"{endpoint}\"\n"));

    wboard(&home)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced at"));

    let body: serde_json::Value =
        serde_json::from_str(&server.join().expect("server thread")).expect("json body");
    assert_eq!(body["widgets"].as_array().map(Vec::len), Some(6));
    assert!(body["layouts"]["lg"].is_array());
    assert!(data_file(&home, "dashboard-last-synced").exists());
}

#[test]
fn test_sync_reports_server_error() {
    let home = TempDir::new().expect("tempdir");
    let (endpoint, server) = one_shot_server("HTTP/1.1 503 Service Unavailable");
    write_config(&home, &format!("[sync]\nendpoint = \"{endpoint}\"\n"));

    wboard(&home)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("503"));
    server.join().expect("server thread");
    assert!(!data_file(&home, "dashboard-last-synced").exists());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_path_uses_xdg_config_home() {
    let home = TempDir::new().expect("tempdir");
    let expected = home
        .path()
        .join("config")
        .join("widget-board")
        .join("config.toml");
    wboard(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_init_then_validate() {
    let home = TempDir::new().expect("tempdir");
    wboard(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration at"));
    wboard(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
    wboard(&home)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_invalid_config_blocks_dashboard_commands() {
    let home = TempDir::new().expect("tempdir");
    write_config(&home, "[sync]\ninterval = \"soon\"\n");
    wboard(&home)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
    wboard(&home)
        .args(["config", "validate"])
        .assert()
        .failure();
}

#[test]
fn test_storage_dir_from_config() {
    let home = TempDir::new().expect("tempdir");
    let custom = home.path().join("elsewhere");
    write_config(
        &home,
        &format!("[storage]\ndata_dir = \"{}\"\n", custom.display()),
    );
    wboard(&home).args(["add", "todo"]).assert().success();
    assert!(custom.join("dashboard-widgets.json").exists());
    assert!(!data_file(&home, "dashboard-widgets").exists());
}

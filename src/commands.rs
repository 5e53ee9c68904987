//! Command implementations for the wboard CLI.
//!
//! Each command loads the dashboard, performs one controller operation, and
//! reports a failed write as a failure even though the in-memory state moved
//! on.

use std::process::ExitCode;
use std::sync::Arc;

use board_store::{FileStore, StoreError};
use widget_board::config::schema::Config;
use widget_board::controller::DashboardController;
use widget_board::layout::Breakpoint;
use widget_board::persistence::{HttpRemote, PersistenceGateway, SyncOutcome};
use widget_board::theme::{primary_hue, BackgroundPattern, PRIMARY_HUES};
use widget_board::widgets::{WidgetRegistry, WidgetType};

/// Open the file store from the config and load the dashboard from it.
pub(crate) fn open_dashboard(config: &Config) -> Result<DashboardController, StoreError> {
    let dir = config.storage.resolved_dir();
    let store = FileStore::open(&dir)?;
    tracing::debug!(dir = %dir.display(), "dashboard storage opened");
    let gateway = PersistenceGateway::new(Arc::new(store));
    let mut dashboard = DashboardController::load(gateway, WidgetRegistry::default());
    dashboard.set_strict_transitions(config.dashboard.strict_transitions);
    Ok(dashboard)
}

fn finish(dashboard: &DashboardController) -> ExitCode {
    match dashboard.last_write_error() {
        Some(e) => {
            eprintln!("Storage error: {e}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

pub(crate) fn show(dashboard: &mut DashboardController, width: u32) -> ExitCode {
    let bp = dashboard.on_viewport_resize(width);
    println!("Breakpoint: {} ({} columns)", bp, bp.cols());
    println!("{:<28} {:<18} {:<10} TITLE", "ID", "TYPE", "POSITION");
    for view in dashboard.views() {
        let position = view
            .placement
            .map(|p| format!("{},{} {}x{}", p.x, p.y, p.w, p.h))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<28} {:<18} {:<10} {}",
            view.id, view.kind, position, view.title
        );
    }
    finish(dashboard)
}

pub(crate) fn types(dashboard: &DashboardController) -> ExitCode {
    let registry = dashboard.registry();
    for kind in registry.available() {
        let descriptor = registry.describe(&kind);
        println!(
            "{:<18} {}x{}  {}",
            kind, descriptor.default_width, descriptor.default_height, descriptor.title
        );
    }
    ExitCode::SUCCESS
}

pub(crate) fn add(dashboard: &mut DashboardController, kind: &str) -> ExitCode {
    let kind: WidgetType = kind.trim().to_ascii_lowercase().into();
    if !dashboard.registry().contains(&kind) {
        eprintln!("Error: unknown widget type '{kind}' (see `wboard types`)");
        return ExitCode::FAILURE;
    }
    match dashboard.add_widget(kind) {
        Ok(widget) => println!("Added {}", widget.id),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }
    finish(dashboard)
}

pub(crate) fn remove(dashboard: &mut DashboardController, id: &str) -> ExitCode {
    let result = dashboard
        .enter_edit()
        .and_then(|()| dashboard.remove_widget(id));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    println!("Removed {id}");
    finish(dashboard)
}

pub(crate) fn place(
    dashboard: &mut DashboardController,
    bp: Breakpoint,
    id: &str,
    (x, y): (u32, u32),
    (w, h): (Option<u32>, Option<u32>),
) -> ExitCode {
    let mut items = dashboard.layouts().items(bp).to_vec();
    let Some(item) = items.iter_mut().find(|item| item.id == id) else {
        eprintln!("Error: no widget with id {id:?} at {bp}");
        return ExitCode::FAILURE;
    };
    item.x = x;
    item.y = y;
    item.w = w.unwrap_or(item.w);
    item.h = h.unwrap_or(item.h);

    let result = dashboard
        .enter_edit()
        .and_then(|()| dashboard.on_external_layout_change(bp, &items));
    match result {
        Ok(false) => println!("Layout unchanged"),
        Ok(true) => {
            if let Some(p) = dashboard.layouts().item(bp, id) {
                println!("Placed {id} at {},{} {}x{} ({bp})", p.x, p.y, p.w, p.h);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }
    finish(dashboard)
}

pub(crate) fn theme(
    dashboard: &mut DashboardController,
    primary: Option<String>,
    pattern: Option<BackgroundPattern>,
    radius: Option<String>,
) -> ExitCode {
    let mut theme = dashboard.theme().clone();
    if let Some(primary) = primary {
        if primary_hue(&primary).is_none() {
            let names: Vec<&str> = PRIMARY_HUES.iter().map(|(name, _)| *name).collect();
            eprintln!(
                "Error: unknown color '{primary}' (expected one of: {})",
                names.join(", ")
            );
            return ExitCode::FAILURE;
        }
        theme.primary_color = primary;
    }
    if let Some(pattern) = pattern {
        theme.background_pattern = pattern;
    }
    if let Some(radius) = radius {
        theme.border_radius = radius;
    }
    dashboard.set_theme(theme);

    let theme = dashboard.theme().clone();
    println!("primary: {}", theme.primary_color);
    println!("pattern: {}", theme.background_pattern.as_str());
    for (name, value) in theme.css_variables() {
        println!("{name}: {value}");
    }
    finish(dashboard)
}

pub(crate) fn sync(dashboard: &DashboardController, config: &Config) -> ExitCode {
    let timeout = match config.sync.timeout() {
        Ok(timeout) => timeout,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let Some(remote) = HttpRemote::from_config(&config.sync, timeout) else {
        eprintln!("Sync error: no endpoint configured (set [sync] endpoint)");
        return ExitCode::FAILURE;
    };
    if !remote.has_token() {
        tracing::warn!(env = %config.sync.token_env, "no sync token set");
    }
    let channel = dashboard.gateway().sync_channel(Arc::new(remote), timeout);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(channel.sync_now()) {
        Ok(SyncOutcome::Synced { at }) => {
            let when = chrono::DateTime::from_timestamp_millis(at)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| at.to_string());
            println!("Synced at {when}");
            ExitCode::SUCCESS
        }
        Ok(SyncOutcome::AlreadyInFlight) => {
            println!("Sync already in progress");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Sync error: {e}");
            ExitCode::FAILURE
        }
    }
}

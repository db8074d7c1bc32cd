use crate::action::dispatcher::ActionDispatcher;
use crate::ax::fixture::FixtureBackend;
use crate::cli::config::{AppConfig, build_dispatch_settings, resolve_target_window};
use crate::snapshot::inspect::collect_input_elements;
use crate::snapshot::orchestrator::snapshot_hierarchy;
use crate::snapshot::snapshot_model::SnapshotFilter;
use crate::trace::logger::TraceLogger;
use crate::{error_document, render_json, snapshot_json};

// ============================================================================
// snapshot subcommand
// ============================================================================

pub fn cmd_snapshot(
    fixture: &str,
    app: Option<&str>,
    window: Option<&str>,
    pretty: bool,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FixtureBackend::load(fixture)?;
    let filter = SnapshotFilter {
        application_name: app.map(str::to_string),
        window_title: window.map(str::to_string),
    };

    println!(
        "{}",
        snapshot_json(&backend, Some(&filter), config.identity.scheme, pretty)
    );
    Ok(())
}

// ============================================================================
// find / type / action subcommands
// ============================================================================

pub fn cmd_find(
    fixture: &str,
    id: &str,
    window: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FixtureBackend::load(fixture)?;
    let target = require_window(window, config)?;
    let dispatcher = ActionDispatcher::new(&backend, build_dispatch_settings(config));

    match dispatcher.find_path(&target, id) {
        Ok(path) => println!("{}", path),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

pub fn cmd_type(
    fixture: &str,
    id: &str,
    text: &str,
    window: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FixtureBackend::load(fixture)?;
    let target = require_window(window, config)?;
    let tracer = open_tracer(config);
    let dispatcher =
        ActionDispatcher::new(&backend, build_dispatch_settings(config)).with_tracer(&tracer);

    match dispatcher.mutate_text(&target, id, text) {
        Ok(mutation) => println!("{}", render_json(&mutation, false)),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

pub fn cmd_action(
    fixture: &str,
    id: &str,
    name: &str,
    window: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FixtureBackend::load(fixture)?;
    let target = require_window(window, config)?;
    let tracer = open_tracer(config);
    let dispatcher =
        ActionDispatcher::new(&backend, build_dispatch_settings(config)).with_tracer(&tracer);

    match dispatcher.invoke_action(&target, id, name) {
        Ok(report) => println!("{}", render_json(&report, false)),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

// ============================================================================
// inputs subcommand
// ============================================================================

pub fn cmd_inputs(
    fixture: &str,
    app: Option<&str>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FixtureBackend::load(fixture)?;
    let filter = SnapshotFilter {
        application_name: app.map(str::to_string),
        window_title: None,
    };

    let document = match snapshot_hierarchy(&backend, Some(&filter), config.identity.scheme) {
        Ok(d) => d,
        Err(e) => {
            println!("{}", error_document(&e));
            return Ok(());
        }
    };

    let inputs = collect_input_elements(&document);
    println!("{} input elements", inputs.len());
    for node in inputs {
        match node.selected_text_bounds() {
            Some(b) => println!(
                "  {} {} selection x={} y={} w={} h={}",
                node.id, node.role, b.x, b.y, b.width, b.height
            ),
            None => println!("  {} {}", node.id, node.role),
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn require_window(
    window: Option<&str>,
    config: &AppConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    resolve_target_window(window, config)
        .ok_or_else(|| "no target window: pass --window or set dispatch.target_window".into())
}

fn open_tracer(config: &AppConfig) -> TraceLogger {
    match &config.trace.path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    }
}

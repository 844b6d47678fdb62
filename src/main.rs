// src/main.rs

use std::path::PathBuf;
use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use clap::Parser;

use skuforge::sheets::events::RequestSheetValidation;
use skuforge::sheets::resources::{SheetRegistry, ValidationResultsCache};
use skuforge::sheets::systems::io::{
    build_workbook_snapshot, PendingWorkbookSnapshot, SnapshotError, WorkbookSnapshot,
};
use skuforge::sheets::SheetsPlugin;

/// Headless host for the SKU workbook core. A grid front-end drives the
/// same plugin through its events; this binary covers snapshot-in,
/// validate, snapshot-out workflows.
#[derive(Parser, Debug)]
#[command(name = "skuforge", version, about)]
struct Args {
    /// Workbook snapshot JSON to load at startup (full-state replacement).
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Run validation over every data sheet, report findings, then exit.
    /// Exits non-zero when any finding is present.
    #[arg(long)]
    validate: bool,
    /// Write the current workbook snapshot JSON to this path, then exit.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn load_snapshot(path: &PathBuf) -> Result<WorkbookSnapshot, SnapshotError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() {
    let args = Args::parse();
    let one_shot = args.validate || args.export.is_some();

    let pending = match &args.snapshot {
        Some(path) => match load_snapshot(path) {
            Ok(snapshot) => Some(PendingWorkbookSnapshot(snapshot)),
            Err(e) => {
                eprintln!("skuforge: cannot load snapshot {:?}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => None,
    };

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins(LogPlugin::default())
    .add_plugins(SheetsPlugin);

    if let Some(pending) = pending {
        app.insert_resource(pending);
    }

    if !one_shot {
        app.run();
        return;
    }

    // One-shot mode: settle startup and the first frame manually instead of
    // entering the runner loop.
    app.update();

    let mut finding_count = 0usize;
    if args.validate {
        let sheet_names = app
            .world()
            .resource::<SheetRegistry>()
            .get_data_sheet_names();
        for sheet_name in &sheet_names {
            app.world_mut().send_event(RequestSheetValidation {
                sheet_name: sheet_name.clone(),
            });
        }
        app.update();

        let results = app.world().resource::<ValidationResultsCache>();
        for sheet_name in &sheet_names {
            let Some(report) = results.get_report(sheet_name) else {
                continue;
            };
            for finding in &report.missing_values {
                warn!(
                    "[{}] row {}, column {}: '{}' is not a value of specification '{}'.",
                    sheet_name,
                    finding.row,
                    finding.column,
                    finding.offending_value,
                    finding.spec_name
                );
            }
            for finding in &report.duplicate_skus {
                warn!(
                    "[{}] row {}: SKU '{}' collides with rows {:?}.",
                    sheet_name, finding.row, finding.sku, finding.colliding_rows
                );
            }
            finding_count += report.missing_values.len() + report.duplicate_skus.len();
        }
        info!("Validation finished: {} finding(s).", finding_count);
    }

    if let Some(path) = &args.export {
        let snapshot = build_workbook_snapshot(app.world().resource::<SheetRegistry>());
        match std::fs::File::create(path) {
            Ok(file) => {
                if let Err(e) = serde_json::to_writer_pretty(file, &snapshot) {
                    eprintln!("skuforge: cannot write snapshot {:?}: {}", path, e);
                    std::process::exit(2);
                }
                info!("Exported workbook snapshot to {:?}.", path);
            }
            Err(e) => {
                eprintln!("skuforge: cannot create {:?}: {}", path, e);
                std::process::exit(2);
            }
        }
    }

    if finding_count > 0 {
        std::process::exit(1);
    }
}

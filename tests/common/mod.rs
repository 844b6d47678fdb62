// tests/common/mod.rs
//! Shared harness: the same App the binary assembles, minus the runner
//! loop, driven frame by frame with `app.update()`.

use bevy::prelude::*;
use uuid::Uuid;

use skuforge::settings::SkuFormatSettings;
use skuforge::sheets::definitions::{ColumnKind, SheetGridData, SheetKind};
use skuforge::sheets::events::{
    AddSheetRowRequest, RequestAddColumn, RequestAddSpecValue, RequestCreateSheet,
    RequestCreateSpecification, UpdateCellEvent,
};
use skuforge::sheets::resources::SheetRegistry;
use skuforge::sheets::SheetsPlugin;

pub fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SheetsPlugin);
    // Settle startup, then pin the format settings so a developer's
    // persisted config cannot leak into assertions.
    app.update();
    app.insert_resource(SkuFormatSettings::default());
    app
}

pub fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

pub fn sheet<'a>(app: &'a App, name: &str) -> &'a SheetGridData {
    app.world()
        .resource::<SheetRegistry>()
        .get_sheet(name)
        .unwrap_or_else(|| panic!("sheet '{}' not found", name))
}

pub fn spec_id(app: &App, sheet_name: &str, spec_name: &str) -> Uuid {
    sheet(app, sheet_name)
        .metadata
        .specifications
        .iter()
        .find(|s| s.name == spec_name)
        .unwrap_or_else(|| panic!("specification '{}' not found", spec_name))
        .id
}

pub fn value_id(app: &App, sheet_name: &str, spec_name: &str, display: &str) -> Uuid {
    let spec_id = spec_id(app, sheet_name, spec_name);
    sheet(app, sheet_name)
        .metadata
        .get_specification(spec_id)
        .unwrap()
        .values
        .iter()
        .find(|v| v.display_value == display)
        .unwrap_or_else(|| panic!("value '{}' not found in '{}'", display, spec_name))
        .id
}

pub fn cell_value(app: &App, sheet_name: &str, row: usize, col: usize) -> String {
    sheet(app, sheet_name).grid[row][col].value.clone()
}

/// Builds a "Catalog" sheet with Color(Red/R, Blue/B) and Size(Small/S,
/// Large/L) specifications, explicitly bound columns at 1 and 2, and one
/// data row. Leaves the row unselected.
pub fn catalog_fixture(app: &mut App) {
    send(
        app,
        RequestCreateSheet {
            sheet_name: "Catalog".to_string(),
            kind: SheetKind::Data,
        },
    );
    send(
        app,
        RequestCreateSpecification {
            sheet_name: "Catalog".to_string(),
            name: "Color".to_string(),
        },
    );
    send(
        app,
        RequestCreateSpecification {
            sheet_name: "Catalog".to_string(),
            name: "Size".to_string(),
        },
    );
    app.update();

    let color = spec_id(app, "Catalog", "Color");
    let size = spec_id(app, "Catalog", "Size");
    for (spec, display, fragment) in [
        (color, "Red", "R"),
        (color, "Blue", "B"),
        (size, "Small", "S"),
        (size, "Large", "L"),
    ] {
        send(
            app,
            RequestAddSpecValue {
                sheet_name: "Catalog".to_string(),
                spec_id: spec,
                display_value: display.to_string(),
                sku_fragment: fragment.to_string(),
            },
        );
    }
    send(
        app,
        RequestAddColumn {
            sheet_name: "Catalog".to_string(),
            header: "Color".to_string(),
            kind: ColumnKind::Spec { spec_id: color },
            position: None,
        },
    );
    send(
        app,
        RequestAddColumn {
            sheet_name: "Catalog".to_string(),
            header: "Size".to_string(),
            kind: ColumnKind::Spec { spec_id: size },
            position: None,
        },
    );
    send(
        app,
        AddSheetRowRequest {
            sheet_name: "Catalog".to_string(),
        },
    );
    app.update();
}

/// Selects `(color, size)` display values on data row 1 of the fixture.
pub fn select_row(app: &mut App, color: &str, size: &str) {
    select_row_at(app, 1, color, size);
}

pub fn select_row_at(app: &mut App, row: usize, color: &str, size: &str) {
    send(
        app,
        UpdateCellEvent {
            sheet_name: "Catalog".to_string(),
            row_index: row,
            col_index: 1,
            new_value: color.to_string(),
        },
    );
    send(
        app,
        UpdateCellEvent {
            sheet_name: "Catalog".to_string(),
            row_index: row,
            col_index: 2,
            new_value: size.to_string(),
        },
    );
    app.update();
}

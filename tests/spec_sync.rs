// tests/spec_sync.rs
//! End-to-end synchronization scenarios driven through the public event
//! API, exactly as a grid front-end would.

mod common;

use common::*;
use skuforge::sheets::events::{
    RequestReorderSpecification, RequestSkuRegeneration, RequestUpdateSkuFormat,
    RequestUpdateSpecValue, UpdateCellEvent,
};

#[test]
fn end_to_end_color_size_walkthrough() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R-S");

    // Fragment change regenerates the SKU and leaves the label alone.
    let red = value_id(&app, "Catalog", "Color", "Red");
    let color = spec_id(&app, "Catalog", "Color");
    send(
        &mut app,
        RequestUpdateSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
            new_display_value: None,
            new_sku_fragment: Some("RD".to_string()),
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "RD-S");
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Red");

    // Settings apply uniformly on the next regeneration.
    send(
        &mut app,
        RequestUpdateSkuFormat {
            prefix: Some("SKU_".to_string()),
            ..Default::default()
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "SKU_RD-S");

    // Rename rewrites the cell and leaves the SKU untouched.
    send(
        &mut app,
        RequestUpdateSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
            new_display_value: Some("Crimson".to_string()),
            new_sku_fragment: None,
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Crimson");
    assert_eq!(sheet(&app, "Catalog").grid[1][1].display, "Crimson");
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "SKU_RD-S");
}

#[test]
fn rename_rewrites_only_bound_columns() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");

    // A free column holding the same text must survive the rename.
    send(
        &mut app,
        skuforge::sheets::events::RequestAddColumn {
            sheet_name: "Catalog".to_string(),
            header: "Notes".to_string(),
            kind: skuforge::sheets::definitions::ColumnKind::Free,
            position: None,
        },
    );
    app.update();
    send(
        &mut app,
        UpdateCellEvent {
            sheet_name: "Catalog".to_string(),
            row_index: 1,
            col_index: 3,
            new_value: "Red".to_string(),
        },
    );
    app.update();

    let color = spec_id(&app, "Catalog", "Color");
    let red = value_id(&app, "Catalog", "Color", "Red");
    send(
        &mut app,
        RequestUpdateSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
            new_display_value: Some("Crimson".to_string()),
            new_sku_fragment: None,
        },
    );
    app.update();

    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Crimson");
    assert_eq!(cell_value(&app, "Catalog", 1, 3), "Red");
}

#[test]
fn rename_matches_trimmed_cell_text() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    send(
        &mut app,
        UpdateCellEvent {
            sheet_name: "Catalog".to_string(),
            row_index: 1,
            col_index: 1,
            new_value: "  Red  ".to_string(),
        },
    );
    app.update();
    // Trimmed text still resolves for generation.
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R");

    let color = spec_id(&app, "Catalog", "Color");
    let red = value_id(&app, "Catalog", "Color", "Red");
    send(
        &mut app,
        RequestUpdateSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
            new_display_value: Some("Crimson".to_string()),
            new_sku_fragment: None,
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Crimson");
}

#[test]
fn reorder_changes_fragment_order() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R-S");

    let color = spec_id(&app, "Catalog", "Color");
    send(
        &mut app,
        RequestReorderSpecification {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            new_order: 9,
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "S-R");
    // Labels are untouched by a reorder.
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Red");
    assert_eq!(cell_value(&app, "Catalog", 1, 2), "Small");
}

#[test]
fn regeneration_is_idempotent() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Blue", "Large");
    let first = cell_value(&app, "Catalog", 1, 0);
    assert_eq!(first, "B-L");

    for _ in 0..2 {
        send(
            &mut app,
            RequestSkuRegeneration {
                sheet_name: "Catalog".to_string(),
            },
        );
        app.update();
        assert_eq!(cell_value(&app, "Catalog", 1, 0), first);
    }
}

#[test]
fn sku_column_rejects_direct_edits() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");
    send(
        &mut app,
        UpdateCellEvent {
            sheet_name: "Catalog".to_string(),
            row_index: 1,
            col_index: 0,
            new_value: "HAND-EDITED".to_string(),
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R-S");
}

#[test]
fn blank_row_keeps_blank_sku_under_prefix() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    send(
        &mut app,
        RequestUpdateSkuFormat {
            prefix: Some("SKU_".to_string()),
            suffix: Some("_END".to_string()),
            ..Default::default()
        },
    );
    app.update();
    // The untouched blank row must not display pure noise.
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "");
}

#[test]
fn stale_selection_drops_out_of_sku_silently() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R-S");

    let color = spec_id(&app, "Catalog", "Color");
    let red = value_id(&app, "Catalog", "Color", "Red");
    send(
        &mut app,
        skuforge::sheets::events::RequestRemoveSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
        },
    );
    app.update();
    // Removal propagates nothing: the SKU cell stays as generated.
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "R-S");

    // The next regeneration omits the vanished value.
    send(
        &mut app,
        RequestSkuRegeneration {
            sheet_name: "Catalog".to_string(),
        },
    );
    app.update();
    assert_eq!(cell_value(&app, "Catalog", 1, 0), "S");
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Red");
}

// tests/validation_findings.rs
//! Validator behavior through the on-demand request path.

mod common;

use common::*;
use skuforge::sheets::events::{
    AddSheetRowRequest, RequestRemoveSpecValue, RequestSheetValidation,
};
use skuforge::sheets::resources::ValidationResultsCache;
use skuforge::sheets::validation::SheetValidationReport;

fn run_validation(app: &mut bevy::app::App) -> SheetValidationReport {
    send(
        app,
        RequestSheetValidation {
            sheet_name: "Catalog".to_string(),
        },
    );
    app.update();
    app.world()
        .resource::<ValidationResultsCache>()
        .get_report("Catalog")
        .expect("report stored after request")
        .clone()
}

#[test]
fn clean_sheet_produces_no_findings() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");
    let report = run_validation(&mut app);
    assert!(report.is_clean());
}

#[test]
fn removed_value_surfaces_as_missing_value_finding() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");

    let color = spec_id(&app, "Catalog", "Color");
    let red = value_id(&app, "Catalog", "Color", "Red");
    send(
        &mut app,
        RequestRemoveSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
        },
    );
    app.update();

    let report = run_validation(&mut app);
    assert_eq!(report.missing_values.len(), 1);
    let finding = &report.missing_values[0];
    assert_eq!(finding.row, 1);
    assert_eq!(finding.column, 1);
    assert_eq!(finding.spec_name, "Color");
    assert_eq!(finding.offending_value, "Red");
    // The valid Size cell stays out of the report.
    assert!(report
        .missing_values
        .iter()
        .all(|f| f.spec_name != "Size"));
}

#[test]
fn duplicate_skus_report_the_colliding_cluster() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    for _ in 0..2 {
        send(
            &mut app,
            AddSheetRowRequest {
                sheet_name: "Catalog".to_string(),
            },
        );
    }
    app.update();

    select_row_at(&mut app, 1, "Red", "Small");
    select_row_at(&mut app, 2, "Red", "Small");
    select_row_at(&mut app, 3, "Blue", "Small");

    let report = run_validation(&mut app);
    assert_eq!(report.duplicate_skus.len(), 2);
    for finding in &report.duplicate_skus {
        assert_eq!(finding.sku, "R-S");
        assert_eq!(finding.colliding_rows, vec![1, 2]);
    }
    assert!(report
        .duplicate_skus
        .iter()
        .all(|f| f.sku != "B-S"));
}

#[test]
fn validation_reflects_propagated_state_same_frame() {
    let mut app = test_app();
    catalog_fixture(&mut app);
    select_row(&mut app, "Red", "Small");

    // Rename and validate in the same frame: propagation runs first, so
    // the rewritten cell is already a member of the new display set.
    let color = spec_id(&app, "Catalog", "Color");
    let red = value_id(&app, "Catalog", "Color", "Red");
    send(
        &mut app,
        skuforge::sheets::events::RequestUpdateSpecValue {
            sheet_name: "Catalog".to_string(),
            spec_id: color,
            value_id: red,
            new_display_value: Some("Crimson".to_string()),
            new_sku_fragment: None,
        },
    );
    let report = run_validation(&mut app);
    assert!(report.is_clean());
    assert_eq!(cell_value(&app, "Catalog", 1, 1), "Crimson");
}

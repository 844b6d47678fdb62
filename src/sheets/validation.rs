// src/sheets/validation.rs
//! On-demand integrity checks over one sheet snapshot. Two independent,
//! side-effect-free passes: spec-bound cells whose value left the bound
//! specification, and SKU collisions across data rows. Findings describe
//! the problem; nothing here mutates or rejects sheet content.

use std::collections::BTreeMap;

use super::binding::{resolve_column_bindings, ColumnBinding};
use super::definitions::{normalize_for_value_cmp, SheetGridData};

/// A non-empty spec-bound cell whose value is not among the bound
/// specification's current display values.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingValueFinding {
    pub row: usize,
    pub column: usize,
    pub spec_name: String,
    pub offending_value: String,
}

/// One member row of a SKU collision cluster. `colliding_rows` carries the
/// full sorted cluster so any single finding explains it.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSkuFinding {
    pub row: usize,
    pub sku: String,
    pub colliding_rows: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SheetValidationReport {
    pub missing_values: Vec<MissingValueFinding>,
    pub duplicate_skus: Vec<DuplicateSkuFinding>,
}

impl SheetValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing_values.is_empty() && self.duplicate_skus.is_empty()
    }
}

/// Runs both passes over `sheet`. Row 0 is the header row and is skipped.
pub fn validate_sheet(sheet: &SheetGridData) -> SheetValidationReport {
    SheetValidationReport {
        missing_values: missing_value_pass(sheet),
        duplicate_skus: duplicate_sku_pass(sheet),
    }
}

fn missing_value_pass(sheet: &SheetGridData) -> Vec<MissingValueFinding> {
    let mut findings = Vec::new();
    let bindings = resolve_column_bindings(&sheet.metadata);

    // Membership sets are built once per bound column, not per cell.
    let columns: Vec<(usize, &str, std::collections::HashSet<String>)> = bindings
        .iter()
        .enumerate()
        .filter_map(|(idx, binding)| match binding {
            ColumnBinding::Specification(spec) => {
                Some((idx, spec.name.as_str(), spec.display_value_set()))
            }
            _ => None,
        })
        .collect();

    for (row_idx, row) in sheet.grid.iter().enumerate().skip(1) {
        for (col_idx, spec_name, allowed) in &columns {
            let Some(cell) = row.get(*col_idx) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            if !allowed.contains(&normalize_for_value_cmp(&cell.value)) {
                findings.push(MissingValueFinding {
                    row: row_idx,
                    column: *col_idx,
                    spec_name: (*spec_name).to_string(),
                    offending_value: cell.value.clone(),
                });
            }
        }
    }
    findings
}

fn duplicate_sku_pass(sheet: &SheetGridData) -> Vec<DuplicateSkuFinding> {
    let Some(sku_col) = sheet.metadata.sku_column_index() else {
        return Vec::new();
    };

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (row_idx, row) in sheet.grid.iter().enumerate().skip(1) {
        let Some(cell) = row.get(sku_col) else {
            continue;
        };
        let sku = cell.value.trim();
        if sku.is_empty() {
            continue;
        }
        groups.entry(sku.to_string()).or_default().push(row_idx);
    }

    let mut findings = Vec::new();
    for (sku, mut rows) in groups {
        if rows.len() < 2 {
            continue;
        }
        rows.sort_unstable();
        for row in &rows {
            findings.push(DuplicateSkuFinding {
                row: *row,
                sku: sku.clone(),
                colliding_rows: rows.clone(),
            });
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::definitions::{
        CellData, ColumnDefinition, SheetGridData, SheetMetadata, SpecValue, Specification,
    };

    fn sheet_with_rows(rows: Vec<Vec<&str>>) -> SheetGridData {
        let mut meta = SheetMetadata::create_generic("Products".to_string(), 0);
        let mut color = Specification::new("Color", 0);
        color.values.push(SpecValue::new("Red", "R"));
        color.values.push(SpecValue::new("Blue", "B"));
        let color_id = color.id;
        meta.specifications.push(color);
        meta.columns
            .push(ColumnDefinition::new_spec("Color", color_id));

        let mut sheet = SheetGridData::new(meta);
        for row in rows {
            sheet
                .grid
                .push(row.into_iter().map(CellData::from_value).collect());
        }
        sheet
    }

    #[test]
    fn valid_cells_produce_no_findings() {
        let sheet = sheet_with_rows(vec![vec!["R", "Red"], vec!["B", "Blue"]]);
        let report = validate_sheet(&sheet);
        assert!(report.is_clean());
    }

    #[test]
    fn stale_value_emits_one_missing_value_finding() {
        let sheet = sheet_with_rows(vec![vec!["R", "Crimson"], vec!["B", "Blue"]]);
        let report = validate_sheet(&sheet);
        assert_eq!(report.missing_values.len(), 1);
        let finding = &report.missing_values[0];
        assert_eq!(finding.row, 1);
        assert_eq!(finding.column, 1);
        assert_eq!(finding.spec_name, "Color");
        assert_eq!(finding.offending_value, "Crimson");
    }

    #[test]
    fn empty_cells_are_not_missing_values() {
        let sheet = sheet_with_rows(vec![vec!["", ""], vec!["", "  "]]);
        assert!(validate_sheet(&sheet).is_clean());
    }

    #[test]
    fn duplicate_skus_report_the_whole_cluster() {
        let sheet = sheet_with_rows(vec![
            vec!["R-S", "Red"],
            vec!["R-S", "Blue"],
            vec!["B-S", "Blue"],
        ]);
        let report = validate_sheet(&sheet);
        assert_eq!(report.duplicate_skus.len(), 2);
        for finding in &report.duplicate_skus {
            assert_eq!(finding.sku, "R-S");
            assert_eq!(finding.colliding_rows, vec![1, 2]);
        }
    }

    #[test]
    fn empty_skus_never_collide() {
        let sheet = sheet_with_rows(vec![vec!["", "Red"], vec!["  ", "Blue"]]);
        assert!(validate_sheet(&sheet).duplicate_skus.is_empty());
    }

    #[test]
    fn free_column_text_is_never_validated() {
        let mut sheet = sheet_with_rows(vec![vec!["R", "Red"]]);
        sheet
            .metadata
            .columns
            .push(ColumnDefinition::new_free("Notes"));
        sheet.ensure_header_row();
        sheet.grid[1].push(CellData::from_value("Crimson"));
        assert!(validate_sheet(&sheet).is_clean());
    }
}

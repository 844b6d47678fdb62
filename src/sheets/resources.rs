// src/sheets/resources.rs
use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use super::definitions::{SheetGridData, SheetKind, SheetMetadata, Specification};
use super::validation::SheetValidationReport;

// --- SheetRegistry ---

/// Owns every sheet. Keyed by sheet name; iteration order is stable so
/// sidebars and exports list sheets deterministically.
#[derive(Resource, Default, Debug)]
pub struct SheetRegistry {
    sheets: BTreeMap<String, SheetGridData>,
}

impl SheetRegistry {
    /// Registers a fresh sheet built from `metadata`. Returns false (and
    /// leaves the registry untouched) when the name is taken.
    pub fn register(&mut self, metadata: SheetMetadata) -> bool {
        let name = metadata.sheet_name.clone();
        if self.sheets.contains_key(&name) {
            warn!("Sheet '{}' already registered. Registration skipped.", name);
            return false;
        }
        self.sheets.insert(name, SheetGridData::new(metadata));
        true
    }

    /// Adds or replaces a sheet wholesale (import path).
    pub fn add_or_replace_sheet(&mut self, name: String, mut data: SheetGridData) {
        if data.metadata.sheet_name != name {
            warn!(
                "Correcting metadata sheet_name ('{}') to match registry key ('{}').",
                data.metadata.sheet_name, name
            );
            data.metadata.sheet_name = name.clone();
        }
        self.sheets.insert(name, data);
    }

    pub fn get_sheet(&self, sheet_name: &str) -> Option<&SheetGridData> {
        self.sheets.get(sheet_name)
    }

    pub fn get_sheet_mut(&mut self, sheet_name: &str) -> Option<&mut SheetGridData> {
        self.sheets.get_mut(sheet_name)
    }

    pub fn does_sheet_exist(&self, sheet_name: &str) -> bool {
        self.sheets.contains_key(sheet_name)
    }

    pub fn get_sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    /// Names of every data sheet (config sheets carry no SKU column).
    pub fn get_data_sheet_names(&self) -> Vec<String> {
        self.sheets
            .iter()
            .filter(|(_, data)| data.metadata.kind == SheetKind::Data)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter_sheets(&self) -> impl Iterator<Item = (&String, &SheetGridData)> {
        self.sheets.iter()
    }

    pub fn delete_sheet(&mut self, sheet_name: &str) -> Result<SheetGridData, String> {
        self.sheets
            .remove(sheet_name)
            .ok_or_else(|| format!("Sheet '{}' not found for deletion.", sheet_name))
    }

    /// Drops every sheet. Used by full-state snapshot replacement.
    pub fn clear(&mut self) {
        self.sheets.clear();
    }
}

// --- SpecBaselineCache ---

/// Per-value snapshot of one specification as last observed by the
/// propagation system.
pub type SpecValueBaseline = HashMap<Uuid, (String, String)>;

/// The reactivity engine's diff baselines: for each (sheet, specification),
/// `value id -> (display_value, sku_fragment)` as of the last completed
/// rewrite pass. There is exactly one baseline per specification at a time;
/// it is re-snapshotted only after the corresponding rewrite fully applied.
#[derive(Resource, Default, Debug)]
pub struct SpecBaselineCache {
    baselines: HashMap<(String, Uuid), SpecValueBaseline>,
}

impl SpecBaselineCache {
    pub fn get(&self, sheet_name: &str, spec_id: Uuid) -> Option<&SpecValueBaseline> {
        self.baselines.get(&(sheet_name.to_string(), spec_id))
    }

    /// Replaces the baseline for one specification with a fresh snapshot.
    pub fn snapshot(&mut self, sheet_name: &str, spec: &Specification) {
        let values: SpecValueBaseline = spec
            .values
            .iter()
            .map(|v| (v.id, (v.display_value.clone(), v.sku_fragment.clone())))
            .collect();
        self.baselines
            .insert((sheet_name.to_string(), spec.id), values);
    }

    /// Teardown for a deleted specification.
    pub fn remove_spec(&mut self, sheet_name: &str, spec_id: Uuid) {
        self.baselines.remove(&(sheet_name.to_string(), spec_id));
    }

    /// Teardown for a deleted sheet.
    pub fn remove_sheet(&mut self, sheet_name: &str) {
        self.baselines.retain(|(name, _), _| name != sheet_name);
    }

    pub fn clear(&mut self) {
        self.baselines.clear();
    }
}

// --- ValidationResultsCache ---

/// Latest validation report per sheet, rebuilt only when a
/// `RequestSheetValidation` arrives. Consumers (a findings panel, the
/// headless CLI) read it on their own schedule.
#[derive(Resource, Default, Debug)]
pub struct ValidationResultsCache {
    reports: HashMap<String, SheetValidationReport>,
}

impl ValidationResultsCache {
    pub fn get_report(&self, sheet_name: &str) -> Option<&SheetValidationReport> {
        self.reports.get(sheet_name)
    }

    pub fn store_report(&mut self, sheet_name: String, report: SheetValidationReport) {
        self.reports.insert(sheet_name, report);
    }

    pub fn clear_sheet_report(&mut self, sheet_name: &str) {
        if self.reports.remove(sheet_name).is_some() {
            trace!("Cleared validation report for sheet '{}'.", sheet_name);
        }
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

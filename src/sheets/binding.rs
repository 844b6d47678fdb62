// src/sheets/binding.rs
//! Resolves a sheet's columns to the specifications they are bound to.
//!
//! Binding is primarily by the explicit `spec_id` on the column definition;
//! a `Free` column whose header text equals a specification name is bound
//! through the header fallback (legacy, header-driven sheets). A `Spec`
//! column whose id no longer resolves degrades to `Free` — cleaning those
//! up is the specification-deletion handler's job, not the resolver's.

use super::definitions::{
    normalize_for_value_cmp, CellData, ColumnKind, SheetMetadata, Specification,
};

/// What a single column resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnBinding<'a> {
    /// The derived SKU column.
    Sku,
    /// Bound to a specification of the same sheet.
    Specification(&'a Specification),
    /// Free text; excluded from SKU generation and validation.
    Free,
}

/// Resolves every column of `meta`, in column order.
pub fn resolve_column_bindings(meta: &SheetMetadata) -> Vec<ColumnBinding<'_>> {
    meta.columns
        .iter()
        .map(|col| match col.kind {
            ColumnKind::Sku => ColumnBinding::Sku,
            ColumnKind::Spec { spec_id } => meta
                .get_specification(spec_id)
                .map(ColumnBinding::Specification)
                .unwrap_or(ColumnBinding::Free),
            ColumnKind::Free => meta
                .specifications
                .iter()
                .find(|s| s.name == col.header)
                .map(ColumnBinding::Specification)
                .unwrap_or(ColumnBinding::Free),
        })
        .collect()
}

/// Column indices bound to `spec_id`, explicit bindings and header-fallback
/// matches alike. Used to target label rewrites.
pub fn columns_bound_to(meta: &SheetMetadata, spec_id: uuid::Uuid) -> Vec<usize> {
    resolve_column_bindings(meta)
        .iter()
        .enumerate()
        .filter_map(|(idx, binding)| match binding {
            ColumnBinding::Specification(spec) if spec.id == spec_id => Some(idx),
            _ => None,
        })
        .collect()
}

/// The ordered `(specification, selected value)` pairs for one data row,
/// as consumed by the SKU generator. Ordered by `Specification.order`
/// ascending, column position breaking ties.
pub fn row_selection_pairs<'a>(
    meta: &'a SheetMetadata,
    row: &'a [CellData],
) -> Vec<(&'a Specification, &'a str)> {
    let mut pairs: Vec<(usize, &Specification, &str)> = resolve_column_bindings(meta)
        .iter()
        .enumerate()
        .filter_map(|(idx, binding)| match binding {
            ColumnBinding::Specification(spec) => {
                let cell = row.get(idx).map(|c| c.value.as_str()).unwrap_or("");
                Some((idx, *spec, cell))
            }
            _ => None,
        })
        .collect();
    pairs.sort_by_key(|(idx, spec, _)| (spec.order, *idx));
    pairs.into_iter().map(|(_, spec, cell)| (spec, cell)).collect()
}

/// True when the row's cell in `col_idx` matches `old_display` after
/// trimming and normalization. Matching is value-based, never id-based.
pub fn cell_matches_display(cell: &CellData, old_display: &str) -> bool {
    normalize_for_value_cmp(&cell.value) == normalize_for_value_cmp(old_display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::definitions::{ColumnDefinition, SpecValue};

    fn sheet_with_color() -> SheetMetadata {
        let mut meta = SheetMetadata::create_generic("Products".to_string(), 0);
        let mut color = Specification::new("Color", 0);
        color.values.push(SpecValue::new("Red", "R"));
        let color_id = color.id;
        meta.specifications.push(color);
        meta.columns
            .push(ColumnDefinition::new_spec("Color", color_id));
        meta
    }

    #[test]
    fn explicit_binding_resolves() {
        let meta = sheet_with_color();
        let bindings = resolve_column_bindings(&meta);
        assert_eq!(bindings[0], ColumnBinding::Sku);
        assert!(matches!(
            bindings[1],
            ColumnBinding::Specification(s) if s.name == "Color"
        ));
    }

    #[test]
    fn header_fallback_binds_free_column() {
        let mut meta = sheet_with_color();
        meta.columns.push(ColumnDefinition::new_free("Color"));
        let bindings = resolve_column_bindings(&meta);
        assert!(matches!(bindings[2], ColumnBinding::Specification(_)));
    }

    #[test]
    fn dangling_spec_id_degrades_to_free() {
        let mut meta = sheet_with_color();
        meta.columns
            .push(ColumnDefinition::new_spec("Stale", uuid::Uuid::new_v4()));
        let bindings = resolve_column_bindings(&meta);
        assert_eq!(bindings[2], ColumnBinding::Free);
    }

    #[test]
    fn unbound_header_is_free() {
        let mut meta = sheet_with_color();
        meta.columns.push(ColumnDefinition::new_free("Notes"));
        let bindings = resolve_column_bindings(&meta);
        assert_eq!(bindings[2], ColumnBinding::Free);
    }

    #[test]
    fn pairs_ordered_by_spec_order_then_column() {
        let mut meta = sheet_with_color();
        let mut size = Specification::new("Size", 5);
        size.values.push(SpecValue::new("Small", "S"));
        let size_id = size.id;
        meta.specifications.push(size);
        // Size column sits left of Color's fallback twin but orders after it.
        meta.columns
            .insert(1, ColumnDefinition::new_spec("Size", size_id));

        let row = vec![
            CellData::default(),
            CellData::from_value("Small"),
            CellData::from_value("Red"),
        ];
        let pairs = row_selection_pairs(&meta, &row);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.name, "Color");
        assert_eq!(pairs[0].1, "Red");
        assert_eq!(pairs[1].0.name, "Size");
        assert_eq!(pairs[1].1, "Small");
    }
}

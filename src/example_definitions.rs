// src/example_definitions.rs
//! Default workbook registered on a fresh start: one product sheet with a
//! pair of ready-made specifications, so the first launch has something to
//! select from.

use crate::sheets::definitions::{
    ColumnDefinition, SheetMetadata, SpecValue, Specification,
};

pub fn default_workbook() -> Vec<SheetMetadata> {
    let mut meta = SheetMetadata::create_generic("Products".to_string(), 0);

    let mut color = Specification::new("Color", 0);
    color.values.push(SpecValue::new("Red", "R"));
    color.values.push(SpecValue::new("Blue", "B"));
    color.values.push(SpecValue::new("Black", "K"));

    let mut size = Specification::new("Size", 1);
    size.values.push(SpecValue::new("Small", "S"));
    size.values.push(SpecValue::new("Medium", "M"));
    size.values.push(SpecValue::new("Large", "L"));

    meta.columns
        .push(ColumnDefinition::new_spec("Color", color.id));
    meta.columns
        .push(ColumnDefinition::new_spec("Size", size.id));
    meta.columns.push(ColumnDefinition::new_free("Notes"));
    meta.specifications.push(color);
    meta.specifications.push(size);

    vec![meta]
}

// src/sheets/sku.rs
//! SKU generation. Pure functions: ordered (specification, selection) pairs
//! plus the format settings in, SKU string out. Every failure condition
//! degrades to omission — a stale selection contributes nothing and is the
//! validator's business to report, not ours.

use std::collections::HashMap;

use uuid::Uuid;

use super::definitions::{normalize_for_value_cmp, SpecValue, Specification};
use crate::settings::SkuFormatSettings;

/// Display-value lookup built once per regeneration pass, so matching a
/// cell against a specification is a hash probe instead of a scan over
/// `values`.
pub struct SpecValueIndex<'a> {
    by_spec: HashMap<Uuid, HashMap<String, &'a SpecValue>>,
}

impl<'a> SpecValueIndex<'a> {
    pub fn build(specifications: &'a [Specification]) -> Self {
        let by_spec = specifications
            .iter()
            .map(|spec| {
                let values = spec
                    .values
                    .iter()
                    .map(|v| (normalize_for_value_cmp(&v.display_value), v))
                    .collect();
                (spec.id, values)
            })
            .collect();
        SpecValueIndex { by_spec }
    }

    pub fn lookup(&self, spec_id: Uuid, raw: &str) -> Option<&'a SpecValue> {
        self.by_spec
            .get(&spec_id)
            .and_then(|values| values.get(&normalize_for_value_cmp(raw)))
            .copied()
    }
}

/// Generates the SKU for one row.
///
/// `pairs` must already be ordered (see `binding::row_selection_pairs`).
/// Empty selections are skipped; a selection that matches no current value
/// contributes nothing; a matched value with an empty fragment also
/// contributes nothing. An all-empty accumulator yields `""` with no
/// prefix or suffix, so blank rows stay blank.
pub fn generate_sku(
    pairs: &[(&Specification, &str)],
    index: &SpecValueIndex<'_>,
    settings: &SkuFormatSettings,
) -> String {
    let mut fragments: Vec<&str> = Vec::with_capacity(pairs.len());
    for (spec, selection) in pairs {
        if selection.trim().is_empty() {
            continue;
        }
        if let Some(value) = index.lookup(spec.id, selection) {
            if !value.sku_fragment.is_empty() {
                fragments.push(&value.sku_fragment);
            }
        }
    }
    if fragments.is_empty() {
        return String::new();
    }
    format!(
        "{}{}{}",
        settings.prefix,
        fragments.join(&settings.delimiter),
        settings.suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_and_size() -> Vec<Specification> {
        let mut color = Specification::new("Color", 0);
        color.values.push(SpecValue::new("Red", "R"));
        color.values.push(SpecValue::new("Blue", "B"));
        let mut size = Specification::new("Size", 1);
        size.values.push(SpecValue::new("Small", "S"));
        size.values.push(SpecValue::new("Large", "L"));
        vec![color, size]
    }

    fn settings() -> SkuFormatSettings {
        SkuFormatSettings {
            delimiter: "-".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    #[test]
    fn joins_fragments_in_pair_order() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "Red"), (&specs[1], "Small")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "R-S");
    }

    #[test]
    fn no_selections_yields_empty_string() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], ""), (&specs[1], "  ")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "");
    }

    #[test]
    fn prefix_and_suffix_skipped_when_accumulator_empty() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "")];
        let fmt = SkuFormatSettings {
            delimiter: "-".to_string(),
            prefix: "SKU_".to_string(),
            suffix: "_X".to_string(),
        };
        assert_eq!(generate_sku(&pairs, &index, &fmt), "");
    }

    #[test]
    fn prefix_and_suffix_applied_when_nonempty() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "Red"), (&specs[1], "Large")];
        let fmt = SkuFormatSettings {
            delimiter: ".".to_string(),
            prefix: "SKU_".to_string(),
            suffix: "_X".to_string(),
        };
        assert_eq!(generate_sku(&pairs, &index, &fmt), "SKU_R.L_X");
    }

    #[test]
    fn matched_value_with_empty_fragment_contributes_nothing() {
        let mut specs = color_and_size();
        specs[0].values.push(SpecValue::new("Unbranded", ""));
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "Unbranded"), (&specs[1], "Small")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "S");
    }

    #[test]
    fn stale_selection_is_omitted_not_an_error() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "Crimson"), (&specs[1], "Small")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "S");
    }

    #[test]
    fn matching_is_case_sensitive_but_trimmed() {
        let specs = color_and_size();
        let index = SpecValueIndex::build(&specs);
        let pairs = vec![(&specs[0], "red")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "");
        let pairs = vec![(&specs[0], "  Red  ")];
        assert_eq!(generate_sku(&pairs, &index, &settings()), "R");
    }
}

// src/sheets/definitions.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Normalizes a raw cell string for display-value comparison: surrounding
/// whitespace is stripped and the text is NFC-normalized so visually
/// identical selections compare equal.
pub fn normalize_for_value_cmp(raw: &str) -> String {
    raw.trim().nfc().collect()
}

/// One selectable option inside a [`Specification`]: a display label paired
/// with the short fragment it contributes to a generated SKU.
///
/// `id` is the stable identity; both `display_value` and `sku_fragment`
/// may change over the value's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecValue {
    pub id: Uuid,
    pub display_value: String,
    #[serde(default)]
    pub sku_fragment: String,
}

impl SpecValue {
    pub fn new(display_value: impl Into<String>, sku_fragment: impl Into<String>) -> Self {
        SpecValue {
            id: Uuid::new_v4(),
            display_value: display_value.into(),
            sku_fragment: sku_fragment.into(),
        }
    }
}

/// A named attribute category (e.g. "Color") with an ordered list of
/// selectable values. Specifications are sheet-scoped: each sheet owns an
/// independent set. `name` doubles as the header-matching key for columns
/// without an explicit binding, and `order` fixes the left-to-right position
/// of the fragment in generated SKUs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specification {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub values: Vec<SpecValue>,
}

impl Specification {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Specification {
            id: Uuid::new_v4(),
            name: name.into(),
            order,
            values: Vec::new(),
        }
    }

    pub fn find_value(&self, value_id: Uuid) -> Option<&SpecValue> {
        self.values.iter().find(|v| v.id == value_id)
    }

    pub fn find_value_mut(&mut self, value_id: Uuid) -> Option<&mut SpecValue> {
        self.values.iter_mut().find(|v| v.id == value_id)
    }

    /// Resolves a raw cell string to a value by normalized display equality.
    pub fn match_display(&self, raw: &str) -> Option<&SpecValue> {
        let needle = normalize_for_value_cmp(raw);
        self.values
            .iter()
            .find(|v| normalize_for_value_cmp(&v.display_value) == needle)
    }

    /// Collects the normalized display values into a set for membership
    /// checks. Built once per validation pass, not per cell.
    pub fn display_value_set(&self) -> HashSet<String> {
        self.values
            .iter()
            .map(|v| normalize_for_value_cmp(&v.display_value))
            .collect()
    }
}

/// What a column holds. Exactly one `Sku` column exists per data sheet,
/// conventionally at index 0; `Spec` columns carry a weak reference into the
/// owning sheet's specification list; everything else is free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnKind {
    Sku,
    Spec { spec_id: Uuid },
    #[default]
    Free,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Sku => write!(f, "Sku"),
            ColumnKind::Spec { spec_id } => write!(f, "Spec({})", spec_id),
            ColumnKind::Free => write!(f, "Free"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    pub id: Uuid,
    pub header: String,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnDefinition {
    pub fn new_free(header: impl Into<String>) -> Self {
        ColumnDefinition {
            id: Uuid::new_v4(),
            header: header.into(),
            kind: ColumnKind::Free,
        }
    }

    pub fn new_sku(header: impl Into<String>) -> Self {
        ColumnDefinition {
            id: Uuid::new_v4(),
            header: header.into(),
            kind: ColumnKind::Sku,
        }
    }

    pub fn new_spec(header: impl Into<String>, spec_id: Uuid) -> Self {
        ColumnDefinition {
            id: Uuid::new_v4(),
            header: header.into(),
            kind: ColumnKind::Spec { spec_id },
        }
    }
}

/// One cell: the stored value plus the text actually rendered. Style
/// attributes from the grid layer are not carried here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CellData {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub display: String,
}

impl CellData {
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        CellData {
            display: value.clone(),
            value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Overwrites both the stored value and the rendered text.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.display = self.value.clone();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SheetKind {
    #[default]
    Data,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetMetadata {
    pub id: Uuid,
    pub sheet_name: String,
    #[serde(default)]
    pub kind: SheetKind,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

pub const SKU_COLUMN_HEADER: &str = "SKU";

impl SheetMetadata {
    /// A fresh data sheet: the SKU column at index 0 plus `num_free_cols`
    /// free-text columns.
    pub fn create_generic(name: String, num_free_cols: usize) -> Self {
        let mut columns = vec![ColumnDefinition::new_sku(SKU_COLUMN_HEADER)];
        columns.extend(
            (0..num_free_cols).map(|i| ColumnDefinition::new_free(format!("Column {}", i + 1))),
        );
        SheetMetadata {
            id: Uuid::new_v4(),
            sheet_name: name,
            kind: SheetKind::Data,
            columns,
            specifications: Vec::new(),
        }
    }

    pub fn sku_column_index(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| matches!(c.kind, ColumnKind::Sku))
    }

    pub fn get_headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    pub fn get_specification(&self, spec_id: Uuid) -> Option<&Specification> {
        self.specifications.iter().find(|s| s.id == spec_id)
    }

    pub fn get_specification_mut(&mut self, spec_id: Uuid) -> Option<&mut Specification> {
        self.specifications.iter_mut().find(|s| s.id == spec_id)
    }

    /// Next free `order` slot for a newly created specification.
    pub fn next_spec_order(&self) -> u32 {
        self.specifications
            .iter()
            .map(|s| s.order + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A sheet: its metadata plus the cell grid. Row 0 is the header row and is
/// never touched by SKU regeneration or label rewriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetGridData {
    pub metadata: SheetMetadata,
    #[serde(default)]
    pub grid: Vec<Vec<CellData>>,
}

impl SheetGridData {
    pub fn new(metadata: SheetMetadata) -> Self {
        let mut data = SheetGridData {
            metadata,
            grid: Vec::new(),
        };
        data.ensure_header_row();
        data
    }

    /// Rewrites row 0 from the column headers, creating it if absent.
    pub fn ensure_header_row(&mut self) {
        let header: Vec<CellData> = self
            .metadata
            .columns
            .iter()
            .map(|c| CellData::from_value(c.header.clone()))
            .collect();
        if self.grid.is_empty() {
            self.grid.push(header);
        } else {
            self.grid[0] = header;
        }
    }

    /// Number of data rows (everything below the header).
    pub fn data_row_count(&self) -> usize {
        self.grid.len().saturating_sub(1)
    }
}

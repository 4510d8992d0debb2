use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::category_for;

// ---------------------------------------------------------------------------
// Source column names (LOINC table export)
// ---------------------------------------------------------------------------

pub mod columns {
    pub const LOINC_NUM: &str = "LOINC_NUM";
    pub const SHORTNAME: &str = "SHORTNAME";
    pub const LONG_COMMON_NAME: &str = "LONG_COMMON_NAME";
    pub const SYSTEM: &str = "SYSTEM";
    pub const COMPONENT: &str = "COMPONENT";
    pub const PROPERTY: &str = "PROPERTY";
    pub const SCALE_TYP: &str = "SCALE_TYP";
    pub const METHOD_TYP: &str = "METHOD_TYP";
    pub const CLASS: &str = "CLASS";

    /// Columns a source must carry.  Everything else may be absent.
    pub const REQUIRED: [&str; 2] = [LOINC_NUM, CLASS];
}

// ---------------------------------------------------------------------------
// SourceRow – one row exactly as it appears in the reference table
// ---------------------------------------------------------------------------

/// Raw row as read from (or written to) a reference table.
///
/// Optional columns that are missing from the source deserialize as `None`,
/// and so do empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    #[serde(rename = "LOINC_NUM")]
    pub loinc_num: String,
    #[serde(rename = "COMPONENT", default)]
    pub component: Option<String>,
    #[serde(rename = "PROPERTY", default)]
    pub property: Option<String>,
    #[serde(rename = "SYSTEM", default)]
    pub system: Option<String>,
    #[serde(rename = "SCALE_TYP", default)]
    pub scale_typ: Option<String>,
    #[serde(rename = "METHOD_TYP", default)]
    pub method_typ: Option<String>,
    #[serde(rename = "CLASS", default)]
    pub class: Option<String>,
    #[serde(rename = "SHORTNAME", default)]
    pub shortname: Option<String>,
    #[serde(rename = "LONG_COMMON_NAME", default)]
    pub long_common_name: Option<String>,
}

// ---------------------------------------------------------------------------
// TestRecord – one lab test with its derived category
// ---------------------------------------------------------------------------

/// A single lab test (one row of the reference table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub loinc_code: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub specimen_system: Option<String>,
    pub component: Option<String>,
    pub property: Option<String>,
    pub scale_type: Option<String>,
    pub method_type: Option<String>,
    /// Raw classification code (`CLASS`).
    pub class_code: Option<String>,
    /// Derived once from `class_code`; `"Other"` when unmapped.
    pub category: &'static str,
}

impl From<SourceRow> for TestRecord {
    fn from(row: SourceRow) -> Self {
        let class_code = non_empty(row.class);
        let category = category_for(class_code.as_deref());
        TestRecord {
            loinc_code: row.loinc_num,
            short_name: non_empty(row.shortname),
            long_name: non_empty(row.long_common_name),
            specimen_system: non_empty(row.system),
            component: non_empty(row.component),
            property: non_empty(row.property),
            scale_type: non_empty(row.scale_typ),
            method_type: non_empty(row.method_typ),
            class_code,
            category,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded table
// ---------------------------------------------------------------------------

/// The full reference table in source order.  Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<TestRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        Catalog { records }
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&TestRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct categories present in the catalog.
    pub fn category_options(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted distinct specimen systems.  Null and empty values are never offered.
    pub fn specimen_options(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.specimen_system.as_deref())
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl FromIterator<TestRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = TestRecord>>(iter: I) -> Self {
        Catalog::from_records(iter.into_iter().collect())
    }
}

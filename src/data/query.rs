use std::fmt;

use super::model::{Catalog, TestRecord};

// ---------------------------------------------------------------------------
// FilterSpec: the current state of the three filter inputs
// ---------------------------------------------------------------------------

/// Sentinel meaning "no constraint" for category and specimen.
pub const ALL: &str = "All";

/// One query's worth of filter inputs.  Built fresh per interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact category name, or [`ALL`].
    pub category: String,
    /// Exact specimen system, or [`ALL`].
    pub specimen_system: String,
    /// Case-insensitive literal substring; empty means no search.
    pub search_text: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            specimen_system: ALL.to_string(),
            search_text: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn new(
        category: impl Into<String>,
        specimen_system: impl Into<String>,
        search_text: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            specimen_system: specimen_system.into(),
            search_text: search_text.into(),
        }
    }

    /// True when no stage of the pipeline would drop anything.
    pub fn is_unfiltered(&self) -> bool {
        self.category == ALL && self.specimen_system == ALL && self.search_text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Lower-cased search term, matched literally against a field.
struct SearchTerm(String);

impl SearchTerm {
    fn new(text: &str) -> Option<Self> {
        (!text.is_empty()).then(|| SearchTerm(text.to_lowercase()))
    }

    /// A null field never matches.
    fn matches(&self, field: Option<&str>) -> bool {
        field.is_some_and(|value| value.to_lowercase().contains(&self.0))
    }

    /// A hit in any one of the searchable fields keeps the record.
    fn matches_record(&self, record: &TestRecord) -> bool {
        self.matches(record.long_name.as_deref())
            || self.matches(record.short_name.as_deref())
            || self.matches(record.component.as_deref())
    }
}

/// Return indices of records that pass every active filter, ascending.
///
/// A record passes when:
/// * category is [`ALL`] or equals the record's derived category
/// * specimen is [`ALL`] or equals the record's specimen (null never equals)
/// * search text is empty or occurs in long name, short name, or component
pub fn filtered_indices(catalog: &Catalog, spec: &FilterSpec) -> Vec<usize> {
    let search = SearchTerm::new(&spec.search_text);

    catalog
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if spec.category != ALL && rec.category != spec.category {
                return false;
            }
            if spec.specimen_system != ALL
                && rec.specimen_system.as_deref() != Some(spec.specimen_system.as_str())
            {
                return false;
            }
            match &search {
                Some(term) => term.matches_record(rec),
                None => true,
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// Records matching `spec`, in catalog order.
pub fn query<'a>(catalog: &'a Catalog, spec: &FilterSpec) -> Vec<&'a TestRecord> {
    filtered_indices(catalog, spec)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .collect()
}

// ---------------------------------------------------------------------------
// Output projection
// ---------------------------------------------------------------------------

/// Columns shown for each result, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColumn {
    LoincCode,
    ShortName,
    LongName,
    Specimen,
    Component,
    Category,
    Property,
    Scale,
    Method,
}

impl DisplayColumn {
    pub const ALL: [DisplayColumn; 9] = [
        DisplayColumn::LoincCode,
        DisplayColumn::ShortName,
        DisplayColumn::LongName,
        DisplayColumn::Specimen,
        DisplayColumn::Component,
        DisplayColumn::Category,
        DisplayColumn::Property,
        DisplayColumn::Scale,
        DisplayColumn::Method,
    ];

    /// Header text shown to users.
    pub fn label(self) -> &'static str {
        match self {
            DisplayColumn::LoincCode => "LOINC Code",
            DisplayColumn::ShortName => "Short Name",
            DisplayColumn::LongName => "Long Name",
            DisplayColumn::Specimen => "Specimen",
            DisplayColumn::Component => "Component",
            DisplayColumn::Category => "Category",
            DisplayColumn::Property => "Property",
            DisplayColumn::Scale => "Scale",
            DisplayColumn::Method => "Method",
        }
    }

    /// The record's value for this column.
    pub fn value(self, record: &TestRecord) -> Option<&str> {
        match self {
            DisplayColumn::LoincCode => Some(record.loinc_code.as_str()),
            DisplayColumn::ShortName => record.short_name.as_deref(),
            DisplayColumn::LongName => record.long_name.as_deref(),
            DisplayColumn::Specimen => record.specimen_system.as_deref(),
            DisplayColumn::Component => record.component.as_deref(),
            DisplayColumn::Category => Some(record.category),
            DisplayColumn::Property => record.property.as_deref(),
            DisplayColumn::Scale => record.scale_type.as_deref(),
            DisplayColumn::Method => record.method_type.as_deref(),
        }
    }
}

impl fmt::Display for DisplayColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One record projected onto [`DisplayColumn::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow<'a> {
    pub cells: [Option<&'a str>; 9],
}

impl<'a> ResultRow<'a> {
    /// `(column, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DisplayColumn, Option<&'a str>)> + '_ {
        DisplayColumn::ALL.into_iter().zip(self.cells.iter().copied())
    }
}

pub fn project(record: &TestRecord) -> ResultRow<'_> {
    ResultRow {
        cells: DisplayColumn::ALL.map(|column| column.value(record)),
    }
}

/// Heading for a result set, e.g. `Results (1 test found):`.
pub fn result_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Results ({count} test{plural} found):")
}

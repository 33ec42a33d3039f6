use arrow::array::BooleanArray;

use crate::core::DashError;
use crate::table::DisclosureTable;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    lowered: String,
}

impl Query {
    /// Returns `None` for a query that is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            lowered: text.to_lowercase(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Exact code match, or case-insensitive substring of the company name.
    pub fn matches(&self, company_code: &str, company_name: &str) -> bool {
        company_code.trim() == self.text || company_name.to_lowercase().contains(&self.lowered)
    }
}

/// Rows of `table` matching `query`, across all years and in table order.
///
/// An empty query yields an empty table.
pub fn search(table: &DisclosureTable, query: &str) -> Result<DisclosureTable, DashError> {
    match Query::parse(query) {
        Some(query) => search_parsed(table, &query),
        None => Ok(DisclosureTable::empty()),
    }
}

pub fn search_parsed(table: &DisclosureTable, query: &Query) -> Result<DisclosureTable, DashError> {
    let codes = table.company_codes();
    let names = table.company_names();
    let mask: BooleanArray = (0..table.num_rows())
        .map(|row| Some(query.matches(codes.value(row), names.value(row))))
        .collect();
    table.filter(&mask)
}

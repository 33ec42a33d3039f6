use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;
use serde::Serialize;

use crate::conf::Config;
use crate::core::DashError;
use crate::dashboard::{Dashboard, build_dashboard};
use crate::ingest::{LoadReport, load_table};
use crate::query::search;
use crate::table::DisclosureTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub years: Vec<i32>,
    pub rows_per_year: BTreeMap<i32, usize>,
    pub report: LoadReport,
}

/// Answers dashboard queries against a table loaded once at startup.
///
/// The table is never mutated after construction, so the service can be
/// shared across request handlers without locking.
pub struct SalaryService {
    table: Arc<DisclosureTable>,
    report: LoadReport,
    config: Config,
}

impl SalaryService {
    /// Loads the configured data directory; any ingestion error is fatal.
    pub fn load(config: Config) -> Result<Self, DashError> {
        let (table, report) = load_table(&config)?;
        info!(
            "Serving {} rows, {} coercion failures",
            table.num_rows(),
            report.coercion_failures()
        );
        Ok(Self {
            table: Arc::new(table),
            report,
            config,
        })
    }

    pub fn from_table(table: DisclosureTable, config: Config) -> Self {
        Self {
            table: Arc::new(table),
            report: LoadReport::default(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &DisclosureTable {
        &self.table
    }

    pub fn search(&self, query: &str) -> Result<DisclosureTable, DashError> {
        search(&self.table, query)
    }

    pub fn dashboard(&self, query: &str) -> Result<Dashboard, DashError> {
        build_dashboard(&self.table, query)
    }

    pub fn summary(&self) -> Summary {
        let mut rows_per_year = BTreeMap::new();
        for year in self.table.years().values().iter() {
            *rows_per_year.entry(*year).or_insert(0) += 1;
        }
        Summary {
            rows: self.table.num_rows(),
            years: rows_per_year.keys().copied().collect(),
            rows_per_year,
            report: self.report.clone(),
        }
    }
}

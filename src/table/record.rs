use serde::Serialize;

/// One company's disclosure for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisclosureRecord {
    pub industry: String,
    pub company_code: String,
    pub company_name: String,
    /// Thousand currency units per person; `None` when not disclosed or unreadable.
    pub avg_salary: Option<f64>,
    pub median_salary: Option<f64>,
    pub year: i32,
}

impl DisclosureRecord {
    pub fn new(
        industry: &str,
        company_code: &str,
        company_name: &str,
        avg_salary: Option<f64>,
        median_salary: Option<f64>,
        year: i32,
    ) -> Self {
        Self {
            industry: industry.to_string(),
            company_code: company_code.to_string(),
            company_name: company_name.to_string(),
            avg_salary,
            median_salary,
            year,
        }
    }
}

/// Which salary statistic to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Average,
    Median,
}


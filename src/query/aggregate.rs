use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, UInt32Array};
use arrow::compute::{SortColumn, SortOptions, lexsort_to_indices};
use serde::Serialize;

use crate::core::DashError;
use crate::table::{DisclosureRecord, DisclosureTable, Metric};

/// Number of companies shown in the industry ranking.
pub const RANKING_LIMIT: usize = 10;

/// Headroom above the tallest bar on value charts.
const CEILING_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub year: i32,
    pub avg: Option<f64>,
    pub median: Option<f64>,
    /// `|avg - median|`, missing when either side is.
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryRanking {
    pub industry: String,
    pub year: i32,
    pub rows: Vec<DisclosureRecord>,
}

pub fn metric_series(matched: &DisclosureTable, metric: Metric) -> Vec<SeriesPoint> {
    let values = matched.metric(metric);
    let years = matched.years();
    (0..matched.num_rows())
        .map(|row| SeriesPoint {
            year: years.value(row),
            value: (!values.is_null(row)).then(|| values.value(row)),
        })
        .collect()
}

pub fn comparison(matched: &DisclosureTable) -> Vec<ComparisonRow> {
    matched
        .records()
        .into_iter()
        .map(|record| ComparisonRow {
            year: record.year,
            avg: record.avg_salary,
            median: record.median_salary,
            gap: record
                .avg_salary
                .zip(record.median_salary)
                .map(|(avg, median)| (avg - median).abs()),
        })
        .collect()
}

/// Top `limit` peers of the first matched company by median salary.
///
/// Peers share the first matched row's industry and the latest year among the
/// matched rows. Missing medians sort last; equal medians keep table order.
/// Returns `None` when nothing was matched.
pub fn industry_ranking(
    table: &DisclosureTable,
    matched: &DisclosureTable,
    limit: usize,
) -> Result<Option<IndustryRanking>, DashError> {
    let (Some(company), Some(year)) = (matched.record(0), matched.max_year()) else {
        return Ok(None);
    };

    let industries = table.industries();
    let years = table.years();
    let mask: BooleanArray = (0..table.num_rows())
        .map(|row| Some(years.value(row) == year && industries.value(row) == company.industry))
        .collect();
    let peers = table.filter(&mask)?;

    let rows = if peers.is_empty() {
        Vec::new()
    } else {
        let medians: ArrayRef = Arc::new(peers.metric(Metric::Median).clone());
        let positions: ArrayRef = Arc::new(UInt32Array::from_iter_values(
            0..peers.num_rows() as u32,
        ));
        let order = lexsort_to_indices(
            &[
                SortColumn {
                    values: medians,
                    options: Some(SortOptions {
                        descending: true,
                        nulls_first: false,
                    }),
                },
                // tiebreaker: original position
                SortColumn {
                    values: positions,
                    options: Some(SortOptions::default()),
                },
            ],
            None,
        )?;
        let top = order.slice(0, limit.min(order.len()));
        peers.take(&top)?.records()
    };

    Ok(Some(IndustryRanking {
        industry: company.industry,
        year,
        rows,
    }))
}

/// Upper bound for a value axis: the largest present value plus headroom.
pub fn value_ceiling(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .map(|max| max * CEILING_FACTOR)
}

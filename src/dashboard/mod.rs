//! Per-query dashboard view model.
//!
//! A submitted query either matches nothing, in which case the dashboard
//! reports it inline, or it resolves to the first matched company and four
//! chart panels: average and median salary by year, the two side by side
//! with their gap, and the industry's top earners in the latest matched year.

mod chart;

use serde::Serialize;

use crate::core::{AVG_SALARY, DashError, MEDIAN_SALARY, YEAR, label_of};
use crate::query::{
    IndustryRanking, Query, RANKING_LIMIT, comparison, industry_ranking, metric_series,
    search_parsed, value_ceiling,
};
use crate::table::{DisclosureRecord, DisclosureTable, Metric};

pub use chart::{
    AVERAGE_COLOR, ChartKind, ChartPanel, MEDIAN_COLOR, Point, RANKING_COLOR, Series,
    UNIT_LABEL, format_value,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyInfo {
    pub name: String,
    pub code: String,
    pub industry: String,
    pub summary: String,
}

impl From<&DisclosureRecord> for CompanyInfo {
    fn from(record: &DisclosureRecord) -> Self {
        Self {
            name: record.company_name.clone(),
            code: record.company_code.clone(),
            industry: record.industry.clone(),
            summary: format!(
                "公司名稱：{}，公司代號：{}，產業類別：{}",
                record.company_name, record.company_code, record.industry
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDashboard {
    pub query: String,
    pub info: CompanyInfo,
    /// Number of matched rows across all years.
    pub matched_rows: usize,
    pub charts: Vec<ChartPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Dashboard {
    /// No query submitted yet.
    Idle,
    NotFound { query: String, message: String },
    Company(CompanyDashboard),
}

impl Dashboard {
    pub fn charts(&self) -> &[ChartPanel] {
        match self {
            Dashboard::Company(company) => &company.charts,
            _ => &[],
        }
    }
}

pub fn build_dashboard(table: &DisclosureTable, raw_query: &str) -> Result<Dashboard, DashError> {
    let Some(query) = Query::parse(raw_query) else {
        return Ok(Dashboard::Idle);
    };

    let matched = search_parsed(table, &query)?;
    let Some(company) = matched.record(0) else {
        return Ok(Dashboard::NotFound {
            query: query.text().to_string(),
            message: DashError::NotFound(query.text().to_string()).to_string(),
        });
    };

    let mut charts = vec![
        metric_panel(&matched, Metric::Average),
        metric_panel(&matched, Metric::Median),
        comparison_panel(&matched),
    ];
    if let Some(ranking) = industry_ranking(table, &matched, RANKING_LIMIT)? {
        charts.push(ranking_panel(&ranking));
    }

    Ok(Dashboard::Company(CompanyDashboard {
        query: query.text().to_string(),
        info: CompanyInfo::from(&company),
        matched_rows: matched.num_rows(),
        charts,
    }))
}

fn metric_panel(matched: &DisclosureTable, metric: Metric) -> ChartPanel {
    let (column, color) = match metric {
        Metric::Average => (AVG_SALARY, AVERAGE_COLOR),
        Metric::Median => (MEDIAN_SALARY, MEDIAN_COLOR),
    };
    let title = label_of(column);
    let points = metric_series(matched, metric);
    let ceiling = value_ceiling(points.iter().map(|p| p.value));

    let series = Series {
        name: title.to_string(),
        color: color.to_string(),
        points: points
            .iter()
            .map(|p| Point {
                x: p.year.to_string(),
                y: p.value,
                text: p.value.map(format_value),
            })
            .collect(),
    };
    ChartPanel::bar(title, label_of(YEAR), series).with_ceiling(ceiling)
}

fn comparison_panel(matched: &DisclosureTable) -> ChartPanel {
    let rows = comparison(matched);
    let average = Series {
        name: "平均數".to_string(),
        color: AVERAGE_COLOR.to_string(),
        points: rows
            .iter()
            .map(|row| Point {
                x: row.year.to_string(),
                y: row.avg,
                text: row.gap.map(format_value),
            })
            .collect(),
    };
    let median = Series {
        name: "中位數".to_string(),
        color: MEDIAN_COLOR.to_string(),
        points: rows
            .iter()
            .map(|row| Point {
                x: row.year.to_string(),
                y: row.median,
                text: None,
            })
            .collect(),
    };
    ChartPanel::grouped("平均數 vs 中位數（依年度）", label_of(YEAR), vec![average, median])
}

fn ranking_panel(ranking: &IndustryRanking) -> ChartPanel {
    let series = Series {
        name: label_of(MEDIAN_SALARY).to_string(),
        color: RANKING_COLOR.to_string(),
        points: ranking
            .rows
            .iter()
            .map(|row| Point {
                x: row.company_name.clone(),
                y: row.median_salary,
                text: None,
            })
            .collect(),
    };
    let title = format!(
        "{}：中位數薪資前十名公司（{}年）",
        ranking.industry, ranking.year
    );
    ChartPanel::bar(&title, "公司名稱", series)
}

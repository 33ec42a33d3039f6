mod aggregate;
mod search;

pub use aggregate::{
    ComparisonRow, IndustryRanking, RANKING_LIMIT, SeriesPoint, comparison, industry_ranking,
    metric_series, value_ceiling,
};
pub use search::{Query, search, search_parsed};

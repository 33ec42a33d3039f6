use crate::conf::{ColumnRule, SchemaConfig};
use crate::core::{AVG_SALARY, COMPANY_CODE, COMPANY_NAME, DashError, INDUSTRY, MEDIAN_SALARY};

/// Positions of the five source columns inside a file's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub industry: usize,
    pub company_code: usize,
    pub company_name: usize,
    pub avg_salary: usize,
    pub median_salary: usize,
}

/// Trims whitespace and stray byte-order marks around a header label.
pub fn normalize_label(label: &str) -> &str {
    label.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

impl ColumnIndices {
    /// Resolves every canonical column against already normalized headers.
    ///
    /// Each rule must match exactly one header; `source` names the file in errors.
    pub fn resolve(
        headers: &[&str],
        schema: &SchemaConfig,
        source: &str,
    ) -> Result<Self, DashError> {
        Ok(Self {
            industry: resolve_one(headers, INDUSTRY, &schema.industry, source)?,
            company_code: resolve_one(headers, COMPANY_CODE, &schema.company_code, source)?,
            company_name: resolve_one(headers, COMPANY_NAME, &schema.company_name, source)?,
            avg_salary: resolve_one(headers, AVG_SALARY, &schema.avg_salary, source)?,
            median_salary: resolve_one(headers, MEDIAN_SALARY, &schema.median_salary, source)?,
        })
    }
}

fn resolve_one(
    headers: &[&str],
    field: &str,
    rule: &ColumnRule,
    source: &str,
) -> Result<usize, DashError> {
    let matches: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, label)| rule.matches(label))
        .map(|(idx, _)| idx)
        .collect();

    match matches.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(DashError::SchemaError(format!(
            "{source}: no column matches {field} (patterns {:?})",
            rule.patterns
        ))),
        many => {
            let labels: Vec<&str> = many.iter().map(|&idx| headers[idx]).collect();
            Err(DashError::SchemaError(format!(
                "{source}: column for {field} is ambiguous, candidates {labels:?}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVG: &str = "非擔任主管職務之全時員工資訊-員工薪資-平均數(仟元/人)";
    const MEDIAN: &str = "非擔任主管職務之全時員工資訊-員工薪資-中位數(仟元/人)";

    #[test]
    fn test_resolve_default_schema() {
        let headers = ["出表日期", "產業類別", "公司代號", "公司名稱", AVG, MEDIAN];
        let indices = ColumnIndices::resolve(&headers, &SchemaConfig::default(), "f.csv").unwrap();
        assert_eq!(
            indices,
            ColumnIndices {
                industry: 1,
                company_code: 2,
                company_name: 3,
                avg_salary: 4,
                median_salary: 5,
            }
        );
    }

    #[test]
    fn test_missing_salary_column() {
        let headers = ["產業類別", "公司代號", "公司名稱", AVG];
        let err = ColumnIndices::resolve(&headers, &SchemaConfig::default(), "上市_112.csv")
            .unwrap_err();
        match err {
            DashError::SchemaError(msg) => {
                assert!(msg.contains("上市_112.csv"));
                assert!(msg.contains(MEDIAN_SALARY));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_salary_column() {
        let second_avg = "非擔任主管職務之全時員工資訊-員工薪資-平均數(前一年度)";
        let headers = ["產業類別", "公司代號", "公司名稱", AVG, second_avg, MEDIAN];
        let err = ColumnIndices::resolve(&headers, &SchemaConfig::default(), "f.csv")
            .unwrap_err();
        match err {
            DashError::SchemaError(msg) => {
                assert!(msg.contains("ambiguous"));
                assert!(msg.contains(second_avg));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("\u{feff}產業類別 "), "產業類別");
        assert_eq!(normalize_label("\t公司代號\u{3000}"), "公司代號");
    }
}

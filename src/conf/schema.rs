use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Header label equals the pattern.
    Exact,
    /// Header label contains the pattern as a substring.
    Contains,
}

/// Acceptable source labels for one canonical column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnRule {
    pub patterns: Vec<String>,
    #[serde(default = "ColumnRule::default_matching")]
    pub matching: MatchMode,
}

impl ColumnRule {
    fn default_matching() -> MatchMode {
        MatchMode::Exact
    }

    pub fn exact(label: &str) -> Self {
        Self {
            patterns: vec![label.to_string()],
            matching: MatchMode::Exact,
        }
    }

    pub fn contains(fragment: &str) -> Self {
        Self {
            patterns: vec![fragment.to_string()],
            matching: MatchMode::Contains,
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.patterns.iter().any(|pattern| match self.matching {
            MatchMode::Exact => label == pattern,
            MatchMode::Contains => label.contains(pattern.as_str()),
        })
    }
}

/// Maps each canonical disclosure column to the header labels it may appear under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default = "SchemaConfig::default_industry")]
    pub industry: ColumnRule,
    #[serde(default = "SchemaConfig::default_company_code")]
    pub company_code: ColumnRule,
    #[serde(default = "SchemaConfig::default_company_name")]
    pub company_name: ColumnRule,
    #[serde(default = "SchemaConfig::default_avg_salary")]
    pub avg_salary: ColumnRule,
    #[serde(default = "SchemaConfig::default_median_salary")]
    pub median_salary: ColumnRule,
}

impl SchemaConfig {
    fn default_industry() -> ColumnRule {
        ColumnRule::exact("產業類別")
    }

    fn default_company_code() -> ColumnRule {
        ColumnRule::exact("公司代號")
    }

    fn default_company_name() -> ColumnRule {
        ColumnRule::exact("公司名稱")
    }

    fn default_avg_salary() -> ColumnRule {
        ColumnRule::contains("非擔任主管職務之全時員工資訊-員工薪資-平均數")
    }

    fn default_median_salary() -> ColumnRule {
        ColumnRule::contains("非擔任主管職務之全時員工資訊-員工薪資-中位數")
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            industry: Self::default_industry(),
            company_code: Self::default_company_code(),
            company_name: Self::default_company_name(),
            avg_salary: Self::default_avg_salary(),
            median_salary: Self::default_median_salary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_rule() {
        let rule = ColumnRule::exact("公司代號");
        assert!(rule.matches("公司代號"));
        assert!(!rule.matches("公司代號(舊)"));
    }

    #[test]
    fn test_contains_rule_with_alternatives() {
        let rule = ColumnRule {
            patterns: vec!["平均數".to_string(), "average".to_string()],
            matching: MatchMode::Contains,
        };
        assert!(rule.matches("員工薪資-平均數(仟元/人)"));
        assert!(rule.matches("salary average"));
        assert!(!rule.matches("員工薪資-中位數"));
    }
}

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

pub const INDUSTRY: &str = "industry";
pub const COMPANY_CODE: &str = "company_code";
pub const COMPANY_NAME: &str = "company_name";
pub const AVG_SALARY: &str = "avg_salary";
pub const MEDIAN_SALARY: &str = "median_salary";
pub const YEAR: &str = "year";

/// Field metadata key holding the display label of a column.
pub const LABEL_KEY: &str = "label";

const LABELS: [(&str, &str); 6] = [
    (INDUSTRY, "產業類別"),
    (COMPANY_CODE, "公司代號"),
    (COMPANY_NAME, "公司名稱"),
    (AVG_SALARY, "非擔任主管職務之全時員工薪資平均數(仟元/人)"),
    (MEDIAN_SALARY, "非擔任主管職務之全時員工薪資中位數(仟元/人)"),
    (YEAR, "年度"),
];

static SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    let field = |name: &str, dtype: DataType, nullable: bool| {
        let metadata = HashMap::from([(LABEL_KEY.to_string(), label_of(name).to_string())]);
        Field::new(name, dtype, nullable).with_metadata(metadata)
    };
    Arc::new(Schema::new(vec![
        field(INDUSTRY, DataType::Utf8, false),
        field(COMPANY_CODE, DataType::Utf8, false),
        field(COMPANY_NAME, DataType::Utf8, false),
        field(AVG_SALARY, DataType::Float64, true),
        field(MEDIAN_SALARY, DataType::Float64, true),
        field(YEAR, DataType::Int32, false),
    ]))
});

/// Arrow schema every disclosure table is stored with.
pub fn disclosure_schema() -> SchemaRef {
    SCHEMA.clone()
}

/// Canonical display label for a disclosure column, or the name itself when unknown.
pub fn label_of(name: &str) -> &str {
    LABELS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, label)| *label)
        .unwrap_or(name)
}

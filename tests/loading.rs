use arrow::array::Array;
use rstest::rstest;
use tempfile::TempDir;

use salarydash::conf::Config;
use salarydash::core::DashError;
use salarydash::ingest::load_table;
use salarydash::query::search;
use salarydash::table::Metric;
use salarydash::testutil::{DisclosureCsv, sample_data_dir, write_year_file};

fn config_for(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.data.dir = dir.path().to_path_buf();
    config
}

/// Every code present in the data can be found again after loading.
#[rstest]
#[case::tsmc("2330", 3)]
#[case::umc("2303", 3)]
#[case::cement("1101", 3)]
#[case::latest_only("2454", 1)]
fn test_search_existing_code(#[case] code: &str, #[case] years: usize) {
    let dir = sample_data_dir();
    let (table, _) = load_table(&config_for(&dir)).unwrap();

    let matched = search(&table, code).unwrap();
    assert_eq!(matched.num_rows(), years);
    for row in 0..matched.num_rows() {
        assert_eq!(matched.company_codes().value(row), code);
    }
}

#[test]
fn test_years_are_tagged_in_file_order() {
    let dir = sample_data_dir();
    let (table, report) = load_table(&config_for(&dir)).unwrap();

    let per_file: Vec<(i32, usize)> = report.files.iter().map(|f| (f.year, f.rows)).collect();
    assert_eq!(per_file, vec![(2021, 3), (2022, 3), (2023, 4)]);
    assert_eq!(table.num_rows(), report.total_rows());

    let years = table.years().values().to_vec();
    assert_eq!(years, vec![2021, 2021, 2021, 2022, 2022, 2022, 2023, 2023, 2023, 2023]);
}

#[test]
fn test_mixed_encodings_are_detected() {
    let dir = sample_data_dir();
    let (table, report) = load_table(&config_for(&dir)).unwrap();

    let encodings: Vec<&str> = report.files.iter().map(|f| f.encoding.as_str()).collect();
    assert_eq!(encodings, vec!["UTF-8", "UTF-8", "Big5"]);

    let matched = search(&table, "聯發").unwrap();
    assert_eq!(matched.num_rows(), 1);
    assert_eq!(matched.years().value(0), 2023);
    assert_eq!(matched.metric(Metric::Median).value(0), 3300.0);
}

#[test]
fn test_dirty_numbers_become_missing() {
    let dir = sample_data_dir();
    let (table, report) = load_table(&config_for(&dir)).unwrap();

    let cement = search(&table, "台泥").unwrap();
    let medians = cement.metric(Metric::Median);
    assert_eq!(medians.value(0), 760.0);
    assert!(medians.is_valid(0));
    assert!(medians.is_null(1));
    assert_eq!(report.files[1].median_salary.failed, 1);
    assert_eq!(report.coercion_failures(), 1);
}

#[test]
fn test_ambiguous_salary_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let csv = DisclosureCsv::with_header(&[
        "產業類別",
        "公司代號",
        "公司名稱",
        "非擔任主管職務之全時員工資訊-員工薪資-平均數(仟元/人)",
        "非擔任主管職務之全時員工資訊-員工薪資-中位數(仟元/人)",
        "非擔任主管職務之全時員工資訊-員工薪資-中位數(前一年度)",
    ])
    .raw_row(&["水泥工業", "1101", "台泥", "900", "700", "650"]);
    write_year_file(dir.path(), 112, &csv).unwrap();

    let err = load_table(&config_for(&dir)).unwrap_err();
    assert!(matches!(err, DashError::SchemaError(msg) if msg.contains("ambiguous")));
}

#[test]
fn test_no_matching_files_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("上櫃_112.csv"), "a,b\n1,2\n").unwrap();

    let err = load_table(&config_for(&dir)).unwrap_err();
    assert!(matches!(err, DashError::ConfigurationError(_)));
}

#[test]
fn test_schema_mapping_from_config() {
    let dir = TempDir::new().unwrap();
    let csv = DisclosureCsv::with_header(&[
        "Industry",
        "Code",
        "Name",
        "Average salary (k/person)",
        "Median salary (k/person)",
    ])
    .raw_row(&["Cement", "1101", "TCC", "1,010", "820"]);
    std::fs::write(dir.path().join("listed-112.txt"), csv.render()).unwrap();

    let toml = format!(
        r#"
        [data]
        dir = "{}"
        file_prefix = "listed-"
        extension = "txt"

        [schema.industry]
        patterns = ["Industry"]

        [schema.company_code]
        patterns = ["Code"]

        [schema.company_name]
        patterns = ["Name"]

        [schema.avg_salary]
        patterns = ["Average salary"]
        matching = "contains"

        [schema.median_salary]
        patterns = ["Median salary"]
        matching = "contains"
        "#,
        dir.path().display()
    );
    let config = Config::from_str(&toml).unwrap();

    let (table, _) = load_table(&config).unwrap();
    let records = table.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].company_name, "TCC");
    assert_eq!(records[0].avg_salary, Some(1010.0));
    assert_eq!(records[0].year, 2023);
}

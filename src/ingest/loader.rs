use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::conf::{DataConfig, SchemaConfig};
use crate::core::DashError;
use crate::table::{DisclosureRecord, DisclosureTable};

use super::columns::{ColumnIndices, normalize_label};
use super::discovery::{FilePattern, YearFile, discover};
use super::encoding::{EncodingDetector, SniffingDetector, decode};
use super::numeric::CoercionStats;

/// What was loaded from one year file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub year: i32,
    pub encoding: String,
    pub rows: usize,
    pub avg_salary: CoercionStats,
    pub median_salary: CoercionStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub files: Vec<FileReport>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows).sum()
    }

    /// Non-blank salary cells that could not be read as numbers, over all files.
    pub fn coercion_failures(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.avg_salary.failed + f.median_salary.failed)
            .sum()
    }
}

/// Builds the multi-year disclosure table from a directory of per-year CSV files.
pub struct TableLoader {
    pattern: FilePattern,
    schema: SchemaConfig,
    detector: Box<dyn EncodingDetector>,
    sniff_bytes: usize,
}

impl TableLoader {
    pub fn new(data: &DataConfig, schema: SchemaConfig) -> Result<Self, DashError> {
        let detector = SniffingDetector::new(data.candidates()?, data.fallback()?);
        Ok(Self {
            pattern: FilePattern::from_config(data)?,
            schema,
            detector: Box::new(detector),
            sniff_bytes: data.sniff_bytes,
        })
    }

    pub fn with_detector(mut self, detector: Box<dyn EncodingDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Loads every matching file in `dir` and concatenates them in file-name order.
    pub fn load_dir(&self, dir: &Path) -> Result<(DisclosureTable, LoadReport), DashError> {
        let files = discover(dir, &self.pattern)?;

        let mut tables = Vec::with_capacity(files.len());
        let mut report = LoadReport::default();
        for file in &files {
            let (table, file_report) = self.load_file(file)?;
            tables.push(table);
            report.files.push(file_report);
        }

        let table = DisclosureTable::concat(&tables)?;
        info!(
            "Loaded {} rows over {} years from {}",
            table.num_rows(),
            table.distinct_years().len(),
            dir.display()
        );
        Ok((table, report))
    }

    /// Loads a single year file, tagging each row with the file's year.
    pub fn load_file(&self, file: &YearFile) -> Result<(DisclosureTable, FileReport), DashError> {
        let bytes = std::fs::read(&file.path)?;
        let encoding = self
            .detector
            .detect(&bytes[..self.sniff_bytes.min(bytes.len())]);
        let (text, used, had_errors) = decode(&bytes, encoding);
        if had_errors {
            warn!(
                "{}: invalid {} sequences replaced while decoding",
                file.file_name,
                used.name()
            );
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let labels: Vec<&str> = headers.iter().map(normalize_label).collect();
        let columns = ColumnIndices::resolve(&labels, &self.schema, &file.file_name)?;

        let mut avg_stats = CoercionStats::default();
        let mut median_stats = CoercionStats::default();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |idx: usize| row.get(idx).unwrap_or("");
            records.push(DisclosureRecord {
                industry: cell(columns.industry).to_string(),
                company_code: cell(columns.company_code).to_string(),
                company_name: cell(columns.company_name).to_string(),
                avg_salary: avg_stats.coerce(cell(columns.avg_salary)),
                median_salary: median_stats.coerce(cell(columns.median_salary)),
                year: file.year,
            });
        }

        for (label, stats) in [("average", &avg_stats), ("median", &median_stats)] {
            if stats.failed > 0 {
                warn!(
                    "{}: {} {} salary values could not be parsed and are treated as missing",
                    file.file_name, stats.failed, label
                );
            }
        }

        let table = DisclosureTable::from_records(&records)?;
        info!(
            "{}: {} rows for {} ({})",
            file.file_name,
            table.num_rows(),
            file.year,
            used.name()
        );

        let report = FileReport {
            file_name: file.file_name.clone(),
            year: file.year,
            encoding: used.name().to_string(),
            rows: table.num_rows(),
            avg_salary: avg_stats,
            median_salary: median_stats,
        };
        Ok((table, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::encoding::NoopDetector;
    use tempfile::TempDir;

    const HEADER: &str = "出表日期,產業類別,公司代號,公司名稱,非擔任主管職務之全時員工資訊-員工薪資-平均數(仟元/人),非擔任主管職務之全時員工資訊-員工薪資-中位數(仟元/人)";

    fn loader() -> TableLoader {
        TableLoader::new(&DataConfig::default(), SchemaConfig::default()).unwrap()
    }

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), format!("{HEADER}\n{body}")).unwrap();
    }

    #[test]
    fn test_load_file_coerces_and_tags_year() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "上市_112.csv",
            "1130101,半導體業,2330,台積電,\"3,260\",\"2,464\"\n1130101,半導體業,2303,聯電,N/A,\n",
        );

        let (table, report) = loader().load_dir(dir.path()).unwrap();
        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            DisclosureRecord::new("半導體業", "2330", "台積電", Some(3260.0), Some(2464.0), 2023)
        );
        assert_eq!(records[1].avg_salary, None);
        assert_eq!(records[1].median_salary, None);

        let file = &report.files[0];
        assert_eq!(file.encoding, "UTF-8");
        assert_eq!(file.avg_salary.failed, 1);
        assert_eq!(file.median_salary.blank, 1);
        assert_eq!(report.coercion_failures(), 1);
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let header = HEADER.replace("公司代號", " 公司代號\t");
        std::fs::write(
            dir.path().join("上市_111.csv"),
            format!("\u{feff}{header}\n1,水泥工業,1101,台泥,900,700\n"),
        )
        .unwrap();

        let (table, _) = loader().load_dir(dir.path()).unwrap();
        assert_eq!(table.company_codes().value(0), "1101");
        assert_eq!(table.years().value(0), 2022);
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "上市_112.csv", "1,水泥工業,1101,台泥\n");

        let (table, report) = loader().load_dir(dir.path()).unwrap();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.records()[0].avg_salary, None);
        assert_eq!(report.files[0].avg_salary.blank, 1);
    }

    #[test]
    fn test_schema_error_names_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("上市_112.csv"),
            "產業類別,公司代號,公司名稱\n水泥工業,1101,台泥\n",
        )
        .unwrap();

        match loader().load_dir(dir.path()) {
            Err(DashError::SchemaError(msg)) => assert!(msg.contains("上市_112.csv")),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_big5_file_with_detector() {
        let dir = TempDir::new().unwrap();
        let text = format!("{HEADER}\n1,半導體業,2330,台積電,\"3,260\",\"2,464\"\n");
        let (bytes, _, _) = encoding_rs::BIG5.encode(&text);
        std::fs::write(dir.path().join("上市_112.csv"), &bytes).unwrap();

        let (table, report) = loader().load_dir(dir.path()).unwrap();
        assert_eq!(report.files[0].encoding, "Big5");
        assert_eq!(table.company_names().value(0), "台積電");

        // without detection the header cannot be read and the schema check fails
        let blind = loader().with_detector(Box::new(NoopDetector::new(encoding_rs::UTF_8)));
        assert!(matches!(
            blind.load_dir(dir.path()),
            Err(DashError::SchemaError(_))
        ));
    }

    /// Records what the detector was shown.
    struct RecordingDetector(std::sync::Arc<std::sync::Mutex<Vec<usize>>>);

    impl EncodingDetector for RecordingDetector {
        fn detect(&self, prefix: &[u8]) -> &'static encoding_rs::Encoding {
            self.0.lock().unwrap().push(prefix.len());
            encoding_rs::UTF_8
        }
    }

    #[test]
    fn test_detector_sees_at_most_sniff_bytes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "上市_111.csv", "1,水泥工業,1101,台泥,900,700\n");
        write(dir.path(), "上市_112.csv", "1,水泥工業,1101,台泥,950,720\n");
        let small_len = std::fs::metadata(dir.path().join("上市_111.csv")).unwrap().len() as usize;

        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let data = DataConfig {
            sniff_bytes: 16,
            ..DataConfig::default()
        };
        let short = TableLoader::new(&data, SchemaConfig::default())
            .unwrap()
            .with_detector(Box::new(RecordingDetector(seen.clone())));
        let (table, _) = short.load_dir(dir.path()).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![16, 16]);

        seen.lock().unwrap().clear();
        let whole = loader().with_detector(Box::new(RecordingDetector(seen.clone())));
        whole.load_dir(dir.path()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![small_len, small_len]);
    }

    #[test]
    fn test_big5_detected_from_short_prefix() {
        let dir = TempDir::new().unwrap();
        let text = format!("{HEADER}\n1,水泥工業,1101,台泥,900,700\n");
        let (bytes, _, _) = encoding_rs::BIG5.encode(&text);
        std::fs::write(dir.path().join("上市_112.csv"), &bytes).unwrap();

        let data = DataConfig {
            sniff_bytes: 8,
            ..DataConfig::default()
        };
        let (table, report) = TableLoader::new(&data, SchemaConfig::default())
            .unwrap()
            .load_dir(dir.path())
            .unwrap();
        assert_eq!(report.files[0].encoding, "Big5");
        assert_eq!(table.company_names().value(0), "台泥");
    }
}

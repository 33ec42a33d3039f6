//! Test and benchmark utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tempfile::TempDir;

use crate::table::{DisclosureRecord, DisclosureTable};

/// Header row as published in the yearly disclosure files.
pub const DISCLOSURE_HEADER: [&str; 6] = [
    "出表日期",
    "產業類別",
    "公司代號",
    "公司名稱",
    "非擔任主管職務之全時員工資訊-員工薪資-平均數(仟元/人)",
    "非擔任主管職務之全時員工資訊-員工薪資-中位數(仟元/人)",
];

/// Builder for a disclosure CSV body with raw, unnormalized cells.
#[derive(Debug, Clone)]
pub struct DisclosureCsv {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Default for DisclosureCsv {
    fn default() -> Self {
        Self::with_header(&DISCLOSURE_HEADER)
    }
}

impl DisclosureCsv {
    pub fn with_header(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row under the default header layout.
    pub fn row(mut self, industry: &str, code: &str, name: &str, avg: &str, median: &str) -> Self {
        self.rows.push(
            ["1130101", industry, code, name, avg, median]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        );
        self
    }

    pub fn raw_row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn render(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.header).unwrap();
        for row in &self.rows {
            writer.write_record(row).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }
}

pub fn year_file_name(era_year: i32) -> String {
    format!("上市_{era_year}.csv")
}

/// Writes `上市_<era_year>.csv` as UTF-8.
pub fn write_year_file(dir: &Path, era_year: i32, csv: &DisclosureCsv) -> std::io::Result<PathBuf> {
    write_year_file_encoded(dir, era_year, csv, encoding_rs::UTF_8)
}

pub fn write_year_file_encoded(
    dir: &Path,
    era_year: i32,
    csv: &DisclosureCsv,
    encoding: &'static Encoding,
) -> std::io::Result<PathBuf> {
    let path = dir.join(year_file_name(era_year));
    let text = csv.render();
    let (bytes, _, unmappable) = encoding.encode(&text);
    assert!(!unmappable, "fixture text not representable in {}", encoding.name());
    std::fs::write(&path, &bytes)?;
    Ok(path)
}

/// Three years of a small listed market, one directory per call.
pub fn sample_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_year_file(
        dir.path(),
        110,
        &DisclosureCsv::default()
            .row("半導體業", "2330", "台積電", "2,800", "2,200")
            .row("半導體業", "2303", "聯電", "1,900", "1,600")
            .row("水泥工業", "1101", "台泥", "900", "760"),
    )
    .unwrap();
    write_year_file(
        dir.path(),
        111,
        &DisclosureCsv::default()
            .row("半導體業", "2330", "台積電", "3,000", "2,400")
            .row("半導體業", "2303", "聯電", "2,100", "1,700")
            .row("水泥工業", "1101", "台泥", "950", "N/A"),
    )
    .unwrap();
    write_year_file_encoded(
        dir.path(),
        112,
        &DisclosureCsv::default()
            .row("半導體業", "2330", "台積電", "3,260", "2,464")
            .row("半導體業", "2303", "聯電", "2,000", "1,700")
            .row("半導體業", "2454", "聯發科", "4,100", "3,300")
            .row("水泥工業", "1101", "台泥", "1,010", "820"),
        encoding_rs::BIG5,
    )
    .unwrap();
    dir
}

/// In-memory table with `companies` rows per year for each of `years`.
pub fn synthetic_table(companies: usize, years: &[i32]) -> DisclosureTable {
    const INDUSTRIES: [&str; 4] = ["半導體業", "水泥工業", "航運業", "金融保險業"];
    let mut records = Vec::with_capacity(companies * years.len());
    for &year in years {
        for i in 0..companies {
            let median = ((i * 37 + year as usize) % 2000) as f64 + 400.0;
            records.push(DisclosureRecord::new(
                INDUSTRIES[i % INDUSTRIES.len()],
                &format!("{}", 1000 + i),
                &format!("Company {i}"),
                Some(median * 1.25),
                (i % 17 != 0).then_some(median),
                year,
            ));
        }
    }
    DisclosureTable::from_records(&records).unwrap()
}

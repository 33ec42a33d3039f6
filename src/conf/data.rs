use std::path::PathBuf;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::core::DashError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "DataConfig::default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "DataConfig::default_extension")]
    pub extension: String,
    /// How many leading bytes of each file the encoding detector looks at.
    #[serde(default = "DataConfig::default_sniff_bytes")]
    pub sniff_bytes: usize,
    /// Encodings tried in order when the sniffed prefix is not UTF-8.
    #[serde(default = "DataConfig::default_candidate_encodings")]
    pub candidate_encodings: Vec<String>,
    #[serde(default = "DataConfig::default_fallback_encoding")]
    pub fallback_encoding: String,
}

impl DataConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_file_prefix() -> String {
        String::from("上市_")
    }

    fn default_extension() -> String {
        String::from("csv")
    }

    fn default_sniff_bytes() -> usize {
        10_000
    }

    fn default_candidate_encodings() -> Vec<String> {
        vec![String::from("big5"), String::from("gbk")]
    }

    fn default_fallback_encoding() -> String {
        String::from("utf-8")
    }

    pub fn candidates(&self) -> Result<Vec<&'static Encoding>, DashError> {
        self.candidate_encodings
            .iter()
            .map(|label| resolve_encoding(label))
            .collect()
    }

    pub fn fallback(&self) -> Result<&'static Encoding, DashError> {
        resolve_encoding(&self.fallback_encoding)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            file_prefix: Self::default_file_prefix(),
            extension: Self::default_extension(),
            sniff_bytes: Self::default_sniff_bytes(),
            candidate_encodings: Self::default_candidate_encodings(),
            fallback_encoding: Self::default_fallback_encoding(),
        }
    }
}

fn resolve_encoding(label: &str) -> Result<&'static Encoding, DashError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        DashError::ConfigParsingError(format!("unknown encoding label '{label}'"))
    })
}

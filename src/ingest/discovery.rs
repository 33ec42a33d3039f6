use std::path::{Path, PathBuf};

use log::{debug, info};
use regex::Regex;

use crate::conf::DataConfig;
use crate::core::DashError;

/// Offset from the Republic of China era calendar to the Gregorian calendar.
pub const ERA_OFFSET: i32 = 1911;

/// One discovered per-year disclosure file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFile {
    pub path: PathBuf,
    pub file_name: String,
    pub era_year: i32,
    /// Gregorian year, `era_year + ERA_OFFSET`.
    pub year: i32,
}

/// Matches `<prefix><2-3 digit era year>.<extension>` file names.
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    pub fn new(prefix: &str, extension: &str) -> Result<Self, DashError> {
        let pattern = format!(
            r"^{}([0-9]{{2,3}})\.{}$",
            regex::escape(prefix),
            regex::escape(extension.trim_start_matches('.'))
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| DashError::ConfigParsingError(format!("file pattern: {e}")))?;
        Ok(Self { regex })
    }

    pub fn from_config(config: &DataConfig) -> Result<Self, DashError> {
        Self::new(&config.file_prefix, &config.extension)
    }

    /// Era year embedded in the file name, if the name matches.
    pub fn era_year(&self, file_name: &str) -> Option<i32> {
        let captures = self.regex.captures(file_name)?;
        captures.get(1)?.as_str().parse().ok()
    }

    pub fn parse(&self, path: &Path) -> Option<YearFile> {
        let file_name = path.file_name()?.to_str()?;
        let era_year = self.era_year(file_name)?;
        Some(YearFile {
            path: path.to_path_buf(),
            file_name: file_name.to_string(),
            era_year,
            year: era_year + ERA_OFFSET,
        })
    }
}

/// Lists the year files in `dir`, sorted by file name.
///
/// Fails with `ConfigurationError` when the directory is missing or holds no
/// matching file.
pub fn discover(dir: &Path, pattern: &FilePattern) -> Result<Vec<YearFile>, DashError> {
    if !dir.is_dir() {
        return Err(DashError::ConfigurationError(format!(
            "data directory {} does not exist or is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match pattern.parse(&path) {
            Some(file) => files.push(file),
            None => debug!("skipping {}: name does not match", path.display()),
        }
    }

    if files.is_empty() {
        return Err(DashError::ConfigurationError(format!(
            "no files matching {} found in {}",
            pattern.regex.as_str(),
            dir.display()
        )));
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    info!(
        "Discovered {} disclosure files in {}",
        files.len(),
        dir.display()
    );
    Ok(files)
}

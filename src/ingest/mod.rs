mod columns;
mod discovery;
mod encoding;
mod loader;
mod numeric;

use crate::conf::Config;
use crate::core::DashError;
use crate::table::DisclosureTable;

pub use columns::{ColumnIndices, normalize_label};
pub use discovery::{ERA_OFFSET, FilePattern, YearFile, discover};
pub use encoding::{EncodingDetector, NoopDetector, SniffingDetector, decode};
pub use loader::{FileReport, LoadReport, TableLoader};
pub use numeric::{CoercionStats, coerce};

/// Loads the disclosure table described by `config.data` and `config.schema`.
pub fn load_table(config: &Config) -> Result<(DisclosureTable, LoadReport), DashError> {
    TableLoader::new(&config.data, config.schema.clone())?.load_dir(&config.data.dir)
}

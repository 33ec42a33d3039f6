mod disclosure;
mod record;

pub use disclosure::DisclosureTable;
pub use record::{DisclosureRecord, Metric};

mod args;
mod error;
mod logger;
mod schema;

pub use args::CliArgs;
pub use error::DashError;
pub use logger::setup_logging;
pub use schema::{
    AVG_SALARY, COMPANY_CODE, COMPANY_NAME, INDUSTRY, LABEL_KEY, MEDIAN_SALARY, YEAR,
    disclosure_schema, label_of,
};

pub mod api;
pub mod conf;
pub mod core;
pub mod dashboard;
pub mod ingest;
pub mod query;
pub mod service;
pub mod table;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

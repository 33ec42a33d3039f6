use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int32Array, StringArray, UInt32Array,
};
use arrow::compute::{concat_batches, filter_record_batch, max, take_record_batch};
use arrow::datatypes::{Float64Type, Int32Type};
use arrow::record_batch::RecordBatch;

use crate::core::{DashError, disclosure_schema};

use super::record::{DisclosureRecord, Metric};

const INDUSTRY_IDX: usize = 0;
const COMPANY_CODE_IDX: usize = 1;
const COMPANY_NAME_IDX: usize = 2;
const AVG_SALARY_IDX: usize = 3;
const MEDIAN_SALARY_IDX: usize = 4;
const YEAR_IDX: usize = 5;

/// Immutable, year-tagged table of disclosure records.
///
/// Backed by a single Arrow batch with the fixed [`disclosure_schema`];
/// every constructor checks that schema so the typed accessors cannot fail.
#[derive(Debug, Clone)]
pub struct DisclosureTable {
    batch: RecordBatch,
}

impl DisclosureTable {
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(disclosure_schema()),
        }
    }

    pub fn from_records(records: &[DisclosureRecord]) -> Result<Self, DashError> {
        let industry: StringArray = records.iter().map(|r| Some(r.industry.as_str())).collect();
        let code: StringArray = records
            .iter()
            .map(|r| Some(r.company_code.as_str()))
            .collect();
        let name: StringArray = records
            .iter()
            .map(|r| Some(r.company_name.as_str()))
            .collect();
        let avg: Float64Array = records.iter().map(|r| r.avg_salary).collect();
        let median: Float64Array = records.iter().map(|r| r.median_salary).collect();
        let year: Int32Array = records.iter().map(|r| Some(r.year)).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(industry),
            Arc::new(code),
            Arc::new(name),
            Arc::new(avg),
            Arc::new(median),
            Arc::new(year),
        ];
        let batch = RecordBatch::try_new(disclosure_schema(), columns)?;
        Ok(Self { batch })
    }

    /// Appends tables in order; row order is preserved within and across tables.
    pub fn concat(tables: &[DisclosureTable]) -> Result<Self, DashError> {
        let batch = concat_batches(&disclosure_schema(), tables.iter().map(|t| &t.batch))?;
        Ok(Self { batch })
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn industries(&self) -> &StringArray {
        self.batch.column(INDUSTRY_IDX).as_string::<i32>()
    }

    pub fn company_codes(&self) -> &StringArray {
        self.batch.column(COMPANY_CODE_IDX).as_string::<i32>()
    }

    pub fn company_names(&self) -> &StringArray {
        self.batch.column(COMPANY_NAME_IDX).as_string::<i32>()
    }

    pub fn metric(&self, metric: Metric) -> &Float64Array {
        let idx = match metric {
            Metric::Average => AVG_SALARY_IDX,
            Metric::Median => MEDIAN_SALARY_IDX,
        };
        self.batch.column(idx).as_primitive::<Float64Type>()
    }

    pub fn years(&self) -> &Int32Array {
        self.batch.column(YEAR_IDX).as_primitive::<Int32Type>()
    }

    pub fn max_year(&self) -> Option<i32> {
        max(self.years())
    }

    /// Distinct years, ascending.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.years().values().to_vec();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn record(&self, row: usize) -> Option<DisclosureRecord> {
        if row >= self.num_rows() {
            return None;
        }
        let value = |array: &Float64Array| (!array.is_null(row)).then(|| array.value(row));
        Some(DisclosureRecord {
            industry: self.industries().value(row).to_string(),
            company_code: self.company_codes().value(row).to_string(),
            company_name: self.company_names().value(row).to_string(),
            avg_salary: value(self.metric(Metric::Average)),
            median_salary: value(self.metric(Metric::Median)),
            year: self.years().value(row),
        })
    }

    pub fn records(&self) -> Vec<DisclosureRecord> {
        (0..self.num_rows()).filter_map(|row| self.record(row)).collect()
    }

    pub fn filter(&self, mask: &BooleanArray) -> Result<Self, DashError> {
        Ok(Self {
            batch: filter_record_batch(&self.batch, mask)?,
        })
    }

    pub fn take(&self, indices: &UInt32Array) -> Result<Self, DashError> {
        Ok(Self {
            batch: take_record_batch(&self.batch, indices)?,
        })
    }
}

impl TryFrom<RecordBatch> for DisclosureTable {
    type Error = DashError;

    /// Adopts a batch whose columns match the disclosure schema by name and type.
    fn try_from(batch: RecordBatch) -> Result<Self, DashError> {
        let expected = disclosure_schema();
        let actual = batch.schema();
        let compatible = actual.fields().len() == expected.fields().len()
            && actual
                .fields()
                .iter()
                .zip(expected.fields().iter())
                .all(|(a, e)| a.name() == e.name() && a.data_type() == e.data_type());
        if !compatible {
            return Err(DashError::TableError(format!(
                "batch schema does not match disclosure schema: {actual:?}"
            )));
        }
        // re-validates nullability against the canonical schema
        let batch = RecordBatch::try_new(expected, batch.columns().to_vec())?;
        Ok(Self { batch })
    }
}

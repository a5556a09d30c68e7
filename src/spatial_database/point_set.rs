use std::collections::HashMap;
use std::num::ParseFloatError;
use std::ops::Deref;
use std::path::Path;

use thiserror::Error;

use super::SamplePoint;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("row {row}: non-finite sample")]
    NonFinite { row: usize },
}

/// An owned collection of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub samples: Vec<SamplePoint>,
}

impl SampleSet {
    pub fn new(samples: Vec<SamplePoint>) -> Self {
        Self { samples }
    }

    /// Read samples from a csv file with a header row.
    pub fn from_csv<P: AsRef<Path>>(
        csv_path: P,
        lat_col: &str,
        lon_col: &str,
        value_col: &str,
    ) -> Result<Self, SampleError> {
        let rdr = csv::Reader::from_path(csv_path)?;
        Self::from_reader(rdr, lat_col, lon_col, value_col)
    }

    pub fn from_reader<R: std::io::Read>(
        mut rdr: csv::Reader<R>,
        lat_col: &str,
        lon_col: &str,
        value_col: &str,
    ) -> Result<Self, SampleError> {
        let mut samples = Vec::new();

        for (row, result) in rdr.deserialize().enumerate() {
            let record: HashMap<String, String> = result?;

            let field = |col: &str| -> Result<f64, SampleError> {
                record
                    .get(col)
                    .ok_or_else(|| SampleError::MissingColumn(col.to_string()))?
                    .trim()
                    .parse::<f64>()
                    .map_err(|source| SampleError::Parse { row, source })
            };

            let sample = SamplePoint::new(field(lat_col)?, field(lon_col)?, field(value_col)?);
            if !sample.is_finite() {
                return Err(SampleError::NonFinite { row });
            }
            samples.push(sample);
        }

        tracing::debug!(count = samples.len(), "samples loaded");
        Ok(Self::new(samples))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}

impl Deref for SampleSet {
    type Target = [SamplePoint];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl From<Vec<SamplePoint>> for SampleSet {
    fn from(samples: Vec<SamplePoint>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<SamplePoint> for SampleSet {
    fn from_iter<I: IntoIterator<Item = SamplePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// File: crates/grapher-core/src/data.rs
// Summary: CSV loading into x/y datasets; numeric or categorical x, numeric y.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::DataSource;
use crate::error::{GrapherError, Result};

/// X values of a dataset; categorical when any x cell is not a number.
#[derive(Clone, Debug, PartialEq)]
pub enum XValues {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl XValues {
    pub fn len(&self) -> usize {
        match self {
            XValues::Numeric(v) => v.len(),
            XValues::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One plottable series read from a CSV file.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    /// Header of the x column.
    pub x_name: String,
    /// Header of the y column.
    pub y_name: String,
    pub x: XValues,
    pub y: Vec<f64>,
    /// Explicit series color, as written in the config.
    pub color: Option<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.x, XValues::Categorical(_))
    }
}

/// What to load in one call to [`DataProcessor::process`].
#[derive(Clone, Debug)]
pub enum DataInput {
    Path(PathBuf),
    Source(DataSource),
    Sources(Vec<DataSource>),
}

impl From<&Path> for DataInput {
    fn from(p: &Path) -> Self { DataInput::Path(p.to_path_buf()) }
}

impl From<PathBuf> for DataInput {
    fn from(p: PathBuf) -> Self { DataInput::Path(p) }
}

impl From<DataSource> for DataInput {
    fn from(s: DataSource) -> Self { DataInput::Source(s) }
}

impl From<Vec<DataSource>> for DataInput {
    fn from(s: Vec<DataSource>) -> Self { DataInput::Sources(s) }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Read `path`; the dataset is labelled with the file stem.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GrapherError::NotFound(path.to_path_buf()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| GrapherError::Csv { path: path.to_path_buf(), source })?;

        let headers = reader
            .headers()
            .map_err(|source| GrapherError::Csv { path: path.to_path_buf(), source })?
            .clone();
        if headers.is_empty() {
            return Err(GrapherError::data(path, "CSV file is empty"));
        }
        if headers.len() < 2 {
            return Err(GrapherError::data(
                path,
                format!("CSV file must have at least 2 columns, found {}", headers.len()),
            ));
        }

        let mut xs: Vec<String> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();
        let mut skipped = 0usize;
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|source| GrapherError::Csv { path: path.to_path_buf(), source })?;
            // header is line 1
            let line = i + 2;
            let x = record.get(0).unwrap_or("");
            let y = record.get(1).unwrap_or("");
            if x.is_empty() || y.is_empty() {
                skipped += 1;
                continue;
            }
            let y: f64 = y.parse().map_err(|_| {
                GrapherError::data(path, format!("row {line}: value '{y}' in column '{}' is not a number", &headers[1]))
            })?;
            xs.push(x.to_string());
            ys.push(y);
        }
        if skipped > 0 {
            warn!(file = %path.display(), skipped, "skipped rows with an empty x or y cell");
        }

        let numeric: Option<Vec<f64>> = xs.iter().map(|x| x.parse::<f64>().ok()).collect();
        let x = match numeric {
            Some(v) => XValues::Numeric(v),
            None => XValues::Categorical(xs),
        };
        debug!(file = %path.display(), rows = ys.len(), categorical = matches!(x, XValues::Categorical(_)), "loaded csv");

        Ok(Dataset {
            label: stem(path),
            x_name: headers[0].to_string(),
            y_name: headers[1].to_string(),
            x,
            y: ys,
            color: None,
        })
    }

    pub fn load_source(&self, source: &DataSource) -> Result<Dataset> {
        let mut dataset = self.load_csv(source.path())?;
        dataset.label = source.label.clone();
        dataset.color = source.color.clone();
        Ok(dataset)
    }

    /// Load every source in order. Failures are logged and skipped; an error only when nothing loads.
    pub fn load_sources(&self, sources: &[DataSource]) -> Result<Vec<Dataset>> {
        let mut datasets = Vec::with_capacity(sources.len());
        for source in sources {
            match self.load_source(source) {
                Ok(d) => datasets.push(d),
                Err(e) => warn!(file = %source.file, error = %e, "skipping data source"),
            }
        }
        if datasets.is_empty() {
            return Err(GrapherError::NoData);
        }
        Ok(datasets)
    }

    /// One message per source whose file is missing.
    pub fn validate_sources(&self, sources: &[DataSource]) -> Vec<String> {
        sources
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.path().exists())
            .map(|(i, s)| format!("Data source {i}: File '{}' does not exist", s.file))
            .collect()
    }

    pub fn process(&self, input: impl Into<DataInput>) -> Result<Vec<Dataset>> {
        match input.into() {
            DataInput::Path(p) => Ok(vec![self.load_csv(p)?]),
            DataInput::Source(s) => Ok(vec![self.load_source(&s)?]),
            DataInput::Sources(s) => self.load_sources(&s),
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

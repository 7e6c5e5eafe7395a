use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record};

/// Columns that must be present in the header row. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "state",
    "abbr",
    "poverty",
    "healthcare",
    "age",
    "income",
    "smokes",
    "obesity",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}, column '{column}': '{value}' is not a finite number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("CSV contains no data rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the survey table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Parse the survey table from any CSV byte source.
///
/// The header is validated before any row is read; numeric cells that do not
/// parse as a finite `f64` are reported with their 1-based data row.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        records.push(columns.parse_row(&row, i + 1)?);
    }

    let dataset = Dataset::new(records).ok_or(LoadError::Empty)?;
    log::debug!("parsed {} records", dataset.len());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Header lookup
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header row.
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();

        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|h| h == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(ColumnIndex { positions })
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    fn text<'r>(&self, row: &'r csv::StringRecord, column: usize) -> &'r str {
        row.get(self.positions[column]).unwrap_or("")
    }

    fn number(&self, row: &csv::StringRecord, column: usize, row_no: usize) -> Result<f64, LoadError> {
        let raw = self.text(row, column);
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::InvalidNumber {
                row: row_no,
                column: REQUIRED_COLUMNS[column],
                value: raw.to_string(),
            })
    }

    fn parse_row(&self, row: &csv::StringRecord, row_no: usize) -> Result<Record, LoadError> {
        Ok(Record {
            state: self.text(row, 0).to_string(),
            abbr: self.text(row, 1).to_string(),
            poverty: self.number(row, 2, row_no)?,
            healthcare: self.number(row, 3, row_no)?,
            age: self.number(row, 4, row_no)?,
            income: self.number(row, 5, row_no)?,
            smokes: self.number(row, 6, row_no)?,
            obesity: self.number(row, 7, row_no)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,state,abbr,poverty,povertyMoe,age,income,healthcare,smokes,obesity\n";

    fn load(body: &str) -> Result<Dataset, LoadError> {
        let text = format!("{HEADER}{body}");
        load_reader(text.as_bytes())
    }

    #[test]
    fn parses_rows_in_file_order() {
        let ds = load(
            "1,Alabama,AL,18.2,0.5,38,42000,11.3,22,31\n\
             2,Alaska,AK,10.9,0.4,33.3,70000,15,19,29.7\n",
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        let al = &ds.records()[0];
        assert_eq!(al.state, "Alabama");
        assert_eq!(al.abbr, "AL");
        assert_eq!(al.poverty, 18.2);
        assert_eq!(al.age, 38.0);
        assert_eq!(al.income, 42000.0);
        assert_eq!(al.healthcare, 11.3);
        assert_eq!(al.smokes, 22.0);
        assert_eq!(al.obesity, 31.0);
        assert_eq!(ds.records()[1].abbr, "AK");
    }

    #[test]
    fn column_order_does_not_matter() {
        let text = "obesity,smokes,income,age,healthcare,poverty,abbr,state\n\
                    31,22,42000,38,11.3,18.2,AL,Alabama\n";
        let ds = load_reader(text.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].poverty, 18.2);
        assert_eq!(ds.records()[0].state, "Alabama");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let ds = load(" 1 , Alabama , AL , 18.2 ,0.5, 38 , 42000 , 11.3 , 22 , 31 \n").unwrap();
        assert_eq!(ds.records()[0].abbr, "AL");
        assert_eq!(ds.records()[0].healthcare, 11.3);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let text = "state,abbr,poverty,age,income,smokes\nAlabama,AL,18.2,38,42000,22\n";
        match load_reader(text.as_bytes()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["healthcare".to_string(), "obesity".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_names_row_and_column() {
        let err = load(
            "1,Alabama,AL,18.2,0.5,38,42000,11.3,22,31\n\
             2,Alaska,AK,n/a,0.4,33.3,70000,15,19,29.7\n",
        )
        .unwrap_err();

        match err {
            LoadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "poverty");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn nan_text_is_rejected() {
        let err = load("1,Alabama,AL,NaN,0.5,38,42000,11.3,22,31\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { column: "poverty", .. }));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(load(""), Err(LoadError::Empty)));
    }

    #[test]
    fn short_row_is_a_csv_error() {
        assert!(matches!(load("1,Alabama,AL,18.2\n"), Err(LoadError::Csv(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.csv"));
    }
}

use std::fmt;

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// Demographic and health statistics for a single US state.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub smokes: f64,
    pub obesity: f64,
}

// ---------------------------------------------------------------------------
// Plottable fields
// ---------------------------------------------------------------------------

/// A numeric column that can be bound to one of the chart axes.
///
/// Each axis has its own closed set of three options, so a selection can
/// never hold a column that belongs to the other axis.
pub trait AxisField: Copy + Eq + fmt::Debug + 'static {
    /// Every option for this axis, in label order.
    const ALL: [Self; 3];

    /// CSV header name of the column.
    fn column(self) -> &'static str;

    /// Clickable axis label text.
    fn axis_label(self) -> &'static str;

    /// Field name shown in the hover tooltip.
    fn tooltip_name(self) -> &'static str;

    /// Read this field from a record.
    fn value(self, record: &Record) -> f64;
}

/// Options for the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XField {
    #[default]
    Poverty,
    Age,
    Income,
}

/// Options for the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YField {
    #[default]
    Healthcare,
    Smokes,
    Obesity,
}

impl AxisField for XField {
    const ALL: [Self; 3] = [XField::Poverty, XField::Age, XField::Income];

    fn column(self) -> &'static str {
        match self {
            XField::Poverty => "poverty",
            XField::Age => "age",
            XField::Income => "income",
        }
    }

    fn axis_label(self) -> &'static str {
        match self {
            XField::Poverty => "in poverty (%)",
            XField::Age => "age (median)",
            XField::Income => "household income (median)",
        }
    }

    fn tooltip_name(self) -> &'static str {
        match self {
            XField::Poverty => "Poverty",
            XField::Age => "Age",
            XField::Income => "Income ($)",
        }
    }

    fn value(self, record: &Record) -> f64 {
        match self {
            XField::Poverty => record.poverty,
            XField::Age => record.age,
            XField::Income => record.income,
        }
    }
}

impl AxisField for YField {
    const ALL: [Self; 3] = [YField::Healthcare, YField::Smokes, YField::Obesity];

    fn column(self) -> &'static str {
        match self {
            YField::Healthcare => "healthcare",
            YField::Smokes => "smokes",
            YField::Obesity => "obesity",
        }
    }

    fn axis_label(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%)",
            YField::Smokes => "Smokers (%)",
            YField::Obesity => "Obese (%)",
        }
    }

    fn tooltip_name(self) -> &'static str {
        match self {
            YField::Healthcare => "Healthcare (%)",
            YField::Smokes => "Smokers",
            YField::Obesity => "Obesity (%)",
        }
    }

    fn value(self, record: &Record) -> f64 {
        match self {
            YField::Healthcare => record.healthcare,
            YField::Smokes => record.smokes,
            YField::Obesity => record.obesity,
        }
    }
}

impl fmt::Display for XField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl fmt::Display for YField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded records in file order. Always holds at least one record, so
/// column extrema are defined.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap loaded records. Returns `None` for an empty table.
    pub fn new(records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Dataset { records })
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Values of one plottable column, in record order.
    pub fn column<F: AxisField>(&self, field: F) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| field.value(r))
    }
}

#[cfg(test)]
pub(crate) fn sample_record(state: &str, abbr: &str, values: [f64; 6]) -> Record {
    let [poverty, age, income, healthcare, smokes, obesity] = values;
    Record {
        state: state.to_string(),
        abbr: abbr.to_string(),
        poverty,
        age,
        income,
        healthcare,
        smokes,
        obesity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(Dataset::new(Vec::new()).is_none());
    }

    #[test]
    fn column_reads_selected_field_in_order() {
        let ds = Dataset::new(vec![
            sample_record("Alabama", "AL", [18.2, 38.0, 42000.0, 11.3, 22.0, 31.0]),
            sample_record("Alaska", "AK", [10.9, 33.3, 70000.0, 15.0, 19.0, 29.7]),
        ])
        .unwrap();

        let income: Vec<f64> = ds.column(XField::Income).collect();
        assert_eq!(income, vec![42000.0, 70000.0]);
        let smokes: Vec<f64> = ds.column(YField::Smokes).collect();
        assert_eq!(smokes, vec![22.0, 19.0]);
    }

    #[test]
    fn every_option_maps_to_a_distinct_column() {
        let mut columns: Vec<&str> = XField::ALL
            .iter()
            .map(|f| f.column())
            .chain(YField::ALL.iter().map(|f| f.column()))
            .collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), 6);
    }

    #[test]
    fn tooltip_names() {
        let x: Vec<&str> = XField::ALL.iter().map(|f| f.tooltip_name()).collect();
        let y: Vec<&str> = YField::ALL.iter().map(|f| f.tooltip_name()).collect();
        assert_eq!(x, vec!["Poverty", "Age", "Income ($)"]);
        assert_eq!(y, vec!["Healthcare (%)", "Smokers", "Obesity (%)"]);
    }

    #[test]
    fn defaults_are_poverty_and_healthcare() {
        assert_eq!(XField::default(), XField::Poverty);
        assert_eq!(YField::default(), YField::Healthcare);
    }
}

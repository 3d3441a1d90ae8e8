use {
    std::io::Read,
    crate::error::TableError,
};

// Cells equal to one of these are read as missing, same as the usual dataframe readers do.
const MISSING_VALUE_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A decoded CSV file: header names plus rows of optional cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            headers,
            rows,
        }
    }

    /// Decodes comma-separated text with a header row. Short rows are padded with
    /// missing cells; rows longer than the header are rejected.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(|v| v.to_owned()).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(TableError::TooManyFields {
                    line: record.position().map(|position| position.line()).unwrap_or(0),
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            let mut row: Vec<Option<String>> = record.iter().map(cell_value).collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn head(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

fn cell_value(raw: &str) -> Option<String> {
    if MISSING_VALUE_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_owned())
    }
}

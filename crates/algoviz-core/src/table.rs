//! Dynamic-programming table shown alongside DP algorithms.

/// Content of a single DP cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TableValue {
    Int(i64),
    Text(String),
}

impl TableValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TableValue::Int(v) => Some(*v),
            TableValue::Text(_) => None,
        }
    }
}

impl From<i64> for TableValue {
    fn from(v: i64) -> Self {
        TableValue::Int(v)
    }
}

impl From<&str> for TableValue {
    fn from(s: &str) -> Self {
        TableValue::Text(s.to_string())
    }
}

impl From<String> for TableValue {
    fn from(s: String) -> Self {
        TableValue::Text(s)
    }
}

impl std::fmt::Display for TableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableValue::Int(v) => write!(f, "{}", v),
            TableValue::Text(s) => f.write_str(s),
        }
    }
}

/// Labeled 2D table; `None` marks a cell that has not been computed yet.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpTable {
    pub cells: Vec<Vec<Option<TableValue>>>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub problem_statement: String,
}

impl DpTable {
    /// Empty `rows x cols` table with no labels.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![None; cols]; rows],
            ..Self::default()
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&TableValue> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Set a cell; returns `false` when the coordinate is outside the table.
    pub fn set(&mut self, row: usize, col: usize, val: TableValue) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = Some(val);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignores_out_of_range() {
        let mut table = DpTable::new(2, 3);
        assert!(table.set(1, 2, TableValue::Int(4)));
        assert!(!table.set(2, 0, TableValue::Int(1)));
        assert_eq!(table.get(1, 2).and_then(TableValue::as_int), Some(4));
        assert_eq!(table.get(0, 0), None);
        assert_eq!((table.rows(), table.cols()), (2, 3));
    }

    #[test]
    fn display_text_and_int() {
        assert_eq!(TableValue::from("AB").to_string(), "AB");
        assert_eq!(TableValue::from(12i64).to_string(), "12");
    }
}

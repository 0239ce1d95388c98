use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

pub const MISSING_CELL: &str = "--";

/// One table cell. Numbers sort numerically, text lexically, missing cells last.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Int(_) | CellValue::Float(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Missing => 2,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => match (self, other) {
                (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => f.write_str(MISSING_CELL),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "\u{25b2}",
            SortOrder::Descending => "\u{25bc}",
        }
    }
}

/// Entry of the "show hidden columns" dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMenuEntry {
    Show { index: usize, name: String },
    NoneHidden,
}

impl ColumnMenuEntry {
    pub fn label(&self) -> &str {
        match self {
            ColumnMenuEntry::Show { name, .. } => name,
            ColumnMenuEntry::NoneHidden => "(no hidden columns)",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ColumnMenuEntry::Show { .. })
    }
}

/// Rows, column visibility and sort order of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    hidden: BTreeSet<usize>,
    sort: Option<(usize, SortOrder)>,
}

impl TableModel {
    pub fn new<S: AsRef<str>>(columns: &[S], data: Vec<Vec<CellValue>>) -> Self {
        let mut model = Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
            hidden: BTreeSet::new(),
            sort: None,
        };
        model.set_rows(data);
        model
    }

    /// Replaces all rows, keeping hidden columns and re-applying the sort.
    /// Short rows are padded with the missing marker, long rows are trimmed.
    pub fn set_rows(&mut self, data: Vec<Vec<CellValue>>) {
        let width = self.columns.len();
        self.rows = data
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        self.apply_sort();
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    pub fn is_hidden(&self, column: usize) -> bool {
        self.hidden.contains(&column)
    }

    pub fn hidden_columns(&self) -> Vec<usize> {
        self.hidden.iter().copied().collect()
    }

    /// Indices of the columns currently shown, in display order.
    pub fn visible_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|c| !self.hidden.contains(c))
            .collect()
    }

    /// Hides `column`. Out-of-range indices are ignored.
    pub fn hide_column(&mut self, column: usize) -> bool {
        column < self.columns.len() && self.hidden.insert(column)
    }

    pub fn show_column(&mut self, column: usize) -> bool {
        self.hidden.remove(&column)
    }

    pub fn column_menu(&self) -> Vec<ColumnMenuEntry> {
        if self.hidden.is_empty() {
            return vec![ColumnMenuEntry::NoneHidden];
        }
        self.hidden
            .iter()
            .map(|&index| ColumnMenuEntry::Show {
                index,
                name: self.columns[index].clone(),
            })
            .collect()
    }

    pub fn hide_action_label(&self, column: usize) -> Option<String> {
        self.columns
            .get(column)
            .map(|name| format!("Hide column '{name}'"))
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    /// Header activation: a new column sorts ascending, the same column toggles.
    pub fn sort_by(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        let order = match self.sort {
            Some((current, order)) if current == column => order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.sort = Some((column, order));
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let Some((column, order)) = self.sort else {
            return;
        };
        self.rows.sort_by(|a, b| {
            let ordering = a[column].sort_cmp(&b[column]);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    /// Header labels of the visible columns, with the sort arrow appended.
    pub fn visible_headers(&self) -> Vec<String> {
        self.visible_columns()
            .into_iter()
            .map(|c| match self.sort {
                Some((sorted, order)) if sorted == c => {
                    format!("{} {}", self.columns[c], order.arrow())
                }
                _ => self.columns[c].clone(),
            })
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<Vec<String>> {
        let visible = self.visible_columns();
        self.rows
            .iter()
            .map(|row| visible.iter().map(|&c| row[c].to_string()).collect())
            .collect()
    }
}

use std::future::Future;

use crate::DataManagerError;

mod credential;
mod google;
mod memory;

pub use credential::Credential;
pub use google::GoogleSheetsClient;
pub use memory::InMemorySheets;

/// Something that can hand out worksheets by title. The production source is
/// [`GoogleSheetsClient`], tests use [`InMemorySheets`].
pub trait SheetSource: Send + Sync + 'static {
    fn fetch_worksheet(&self, title: &str) -> impl Future<Output = Result<Worksheet, DataManagerError>> + Send;
}

/// A header row plus data rows, every cell as the string the sheet shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Worksheet {
    /// First row is the header, the remaining ones are data.
    pub fn from_values(title: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        let mut values = values.into_iter();
        let header = values
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        Self {
            title: title.into(),
            header,
            rows: values.collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<usize, DataManagerError> {
        self.column_any(&[name])
    }

    /// Index of the first header matching any of `names`, in order of preference.
    pub fn column_any(&self, names: &[&str]) -> Result<usize, DataManagerError> {
        names
            .iter()
            .find_map(|name| self.header.iter().position(|h| h == name))
            .ok_or_else(|| DataManagerError::Schema {
                worksheet: self.title.clone(),
                column: names.first().copied().unwrap_or_default().to_string(),
            })
    }

    /// Cell text, or "" when the row is shorter than the header.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Row number as shown in the spreadsheet UI (the header is row 1).
    pub fn sheet_row_number(row: usize) -> usize {
        row + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Worksheet {
        Worksheet::from_values("Volunteers", vec![
            vec!["Timestamp".into(), " Longitude ".into()],
            vec!["3/20/2020 10:00:00".into()],
        ])
    }

    #[test]
    fn resolves_columns_with_fallback() {
        let sheet = sheet();
        assert_eq!(sheet.column("Timestamp").unwrap(), 0);
        assert_eq!(sheet.column_any(&["Longtitude", "Longitude"]).unwrap(), 1);

        match sheet.column("Radius") {
            Err(DataManagerError::Schema { worksheet, column }) => {
                assert_eq!(worksheet, "Volunteers");
                assert_eq!(column, "Radius");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_read_as_empty() {
        let sheet = sheet();
        assert_eq!(sheet.cell(0, 0), "3/20/2020 10:00:00");
        assert_eq!(sheet.cell(0, 1), "");
        assert_eq!(sheet.cell(5, 0), "");
    }

    #[test]
    fn empty_values_give_empty_sheet() {
        let sheet = Worksheet::from_values("Requests", Vec::new());
        assert!(sheet.header.is_empty());
        assert!(sheet.is_empty());
    }
}

use std::collections::HashMap;

use crate::DataManagerError;

use super::{SheetSource, Worksheet};

/// Worksheets held in memory. A title that was never inserted fails like an
/// unreachable upstream would.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheets {
    worksheets: HashMap<String, Worksheet>,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worksheet(mut self, worksheet: Worksheet) -> Self {
        self.worksheets.insert(worksheet.title.clone(), worksheet);
        self
    }
}

impl SheetSource for InMemorySheets {
    async fn fetch_worksheet(&self, title: &str) -> Result<Worksheet, DataManagerError> {
        self.worksheets
            .get(title)
            .cloned()
            .ok_or_else(|| DataManagerError::Fetch {
                worksheet: title.to_string(),
                reason: "worksheet not found".to_string(),
            })
    }
}

#[tokio::test]
async fn missing_worksheet_is_a_fetch_error() {
    let sheets = InMemorySheets::new().with_worksheet(Worksheet::from_values("Volunteers", Vec::new()));

    assert!(sheets.fetch_worksheet("Volunteers").await.is_ok());
    assert!(matches!(
        sheets.fetch_worksheet("Requests").await,
        Err(DataManagerError::Fetch { .. })
    ));
}

use rand::Rng;
use volunteer_atlas_lib::{category::Category, request::Request, volunteer::Volunteer};

use crate::{
    normalize::{normalize_requests, normalize_volunteers, Normalized},
    sheets::{SheetSource, Worksheet},
    DataManagerError, DEFAULT_JITTER,
};

/// One fresh read of both worksheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtlasData {
    pub volunteers: Normalized<Volunteer>,
    pub requests: Normalized<Request>,
}

pub struct DataManager<S> {
    source: S,
    jitter: f64,
}

/// The public interface for reading atlas records. Nothing is cached, every
/// call goes back to the source and draws new jitter.
impl<S: SheetSource> DataManager<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            jitter: DEFAULT_JITTER,
        }
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.abs();
        self
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Fetches both worksheets concurrently. Either one failing fails the whole read.
    pub async fn fetch_worksheets(&self) -> Result<(Worksheet, Worksheet), DataManagerError> {
        futures::try_join!(
            self.source.fetch_worksheet(Category::Volunteers.worksheet()),
            self.source.fetch_worksheet(Category::Requests.worksheet())
        )
    }

    pub fn normalize<R: Rng + ?Sized>(&self, volunteers: &Worksheet, requests: &Worksheet, rng: &mut R) -> Result<AtlasData, DataManagerError> {
        let data = AtlasData {
            volunteers: normalize_volunteers(volunteers, self.jitter, rng)?,
            requests: normalize_requests(requests, self.jitter, rng)?,
        };

        tracing::info!(
            "Read {} volunteers ({} rejected) and {} requests ({} rejected)",
            data.volunteers.records.len(),
            data.volunteers.rejected.len(),
            data.requests.records.len(),
            data.requests.rejected.len(),
        );

        Ok(data)
    }

    /// Fetch and normalize with the thread-local random source.
    pub async fn fetch_atlas(&self) -> Result<AtlasData, DataManagerError> {
        let (volunteers, requests) = self.fetch_worksheets().await?;
        self.normalize(&volunteers, &requests, &mut rand::rng())
    }
}

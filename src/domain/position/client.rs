//! Positions sub-client — latest position queries and backend refresh.

use crate::client::IssClient;
use crate::domain::position::wire::LastResponse;
use crate::domain::position::PositionSample;
use crate::error::SdkError;

pub struct Positions<'a> {
    pub(crate) client: &'a IssClient,
}

impl<'a> Positions<'a> {
    /// Raw `/last` response as the backend sent it.
    pub async fn last_raw(&self) -> Result<LastResponse, SdkError> {
        Ok(self.client.http.get_last().await?)
    }

    /// Latest position, normalized. `None` when the backend has no record yet.
    pub async fn latest(&self) -> Result<Option<PositionSample>, SdkError> {
        let resp = self.last_raw().await?;
        Ok(resp.into_sample()?)
    }

    /// Ask the backend to pull a fresh record from the upstream feed now.
    ///
    /// Returns the new `/last` body. Not retried: every call triggers an
    /// upstream request.
    pub async fn trigger_fetch(&self) -> Result<LastResponse, SdkError> {
        Ok(self.client.http.trigger_fetch().await?)
    }
}

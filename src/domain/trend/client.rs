//! Trend sub-client — movement summary queries.

use crate::client::IssClient;
use crate::domain::trend::TrendSummary;
use crate::error::SdkError;

pub struct Trends<'a> {
    pub(crate) client: &'a IssClient,
}

impl<'a> Trends<'a> {
    pub async fn get(&self) -> Result<TrendSummary, SdkError> {
        let resp = self.client.http.get_trend().await?;
        Ok(TrendSummary::from(resp))
    }
}

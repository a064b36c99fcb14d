//! Where a poller gets its data from.

use crate::domain::position::wire::LastResponse;
use crate::domain::trend::wire::TrendResponse;
use crate::error::HttpError;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`TelemetrySource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, HttpError>> + Send + 'a>>;

/// The two feeds a poll cycle reads.
///
/// [`IssHttp`](crate::http::IssHttp) is the production implementation; tests
/// substitute scripted sources.
pub trait TelemetrySource: Send + Sync + 'static {
    /// Latest stored position record (`GET /last`).
    fn last_position(&self) -> SourceFuture<'_, LastResponse>;

    /// Movement between the two latest records (`GET /iss/trend`).
    fn trend(&self) -> SourceFuture<'_, TrendResponse>;
}

impl<S: TelemetrySource + ?Sized> TelemetrySource for Arc<S> {
    fn last_position(&self) -> SourceFuture<'_, LastResponse> {
        (**self).last_position()
    }

    fn trend(&self) -> SourceFuture<'_, TrendResponse> {
        (**self).trend()
    }
}

#[cfg(feature = "http")]
impl TelemetrySource for crate::http::IssHttp {
    fn last_position(&self) -> SourceFuture<'_, LastResponse> {
        Box::pin(self.get_last())
    }

    fn trend(&self) -> SourceFuture<'_, TrendResponse> {
        Box::pin(self.get_trend())
    }
}

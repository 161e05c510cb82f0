//! Transport collaborator: performs one HTTP exchange per call.
//!
//! The retry loop only depends on the [`Transport`] trait. [`CurlTransport`]
//! is the bundled libcurl implementation; tests and embedders can plug in
//! their own.

mod error;
mod libcurl;

pub use error::TransportError;
pub use libcurl::{CurlOptions, CurlTransport};

use crate::request::RequestSpec;
use crate::response::Response;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// One outbound HTTP exchange.
///
/// Implementations must surface non-2xx statuses as `Err`, never as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends `spec` once and decodes the payload as `T`.
    async fn perform<T>(&self, spec: &RequestSpec) -> Result<Response<T>, Self::Error>
    where
        T: DeserializeOwned + Send + 'static;
}

#[async_trait]
impl<Tr: Transport> Transport for Arc<Tr> {
    type Error = Tr::Error;

    async fn perform<T>(&self, spec: &RequestSpec) -> Result<Response<T>, Self::Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        (**self).perform(spec).await
    }
}

//! Method aliases: fix `spec.method`, then delegate to `execute`.

use super::policy::RetryPolicy;
use super::run::{RetryController, RetryResult};
use crate::request::{Method, RequestSpec};
use crate::transport::Transport;
use serde::de::DeserializeOwned;

impl<Tr: Transport> RetryController<Tr> {
    pub async fn get<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Get, policy, spec).await
    }

    pub async fn head<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Head, policy, spec).await
    }

    pub async fn options<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Options, policy, spec).await
    }

    pub async fn delete<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Delete, policy, spec).await
    }

    pub async fn post<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Post, policy, spec).await
    }

    pub async fn put<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Put, policy, spec).await
    }

    pub async fn patch<T>(&self, policy: &RetryPolicy<T>, spec: RequestSpec) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.execute_with_method(Method::Patch, policy, spec).await
    }

    /// Overrides any method already set on `spec`.
    async fn execute_with_method<T>(
        &self,
        method: Method,
        policy: &RetryPolicy<T>,
        mut spec: RequestSpec,
    ) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        spec.method = Some(method);
        self.execute(policy, spec).await
    }
}

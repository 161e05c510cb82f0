//! Request description handed to the transport on every attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// HTTP method used by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Options,
    Delete,
    Post,
    Put,
    Patch,
}

impl Method {
    /// Uppercase wire name (e.g. `"GET"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Delete => "DELETE",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "DELETE" => Ok(Method::Delete),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Transport configuration for one logical request.
///
/// Passed unmodified to the transport on each attempt. Method aliases on
/// [`RetryController`](crate::retry::RetryController) overwrite `method`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Absolute http/https URL.
    pub url: String,
    /// Method; transports treat `None` as GET.
    #[serde(default)]
    pub method: Option<Method>,
    /// Extra request headers, sent in order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    #[serde(default)]
    pub body: Option<Vec<u8>>,
    /// Whole-transfer timeout; transport default when unset.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    pub fn with_json<B: Serialize>(self, value: &B) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Method the transport should use.
    pub fn effective_method(&self) -> Method {
        self.method.unwrap_or(Method::Get)
    }
}

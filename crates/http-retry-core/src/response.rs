//! Response value produced by a transport.

use serde::{Deserialize, Serialize};

/// A response the transport accepted at the HTTP level (2xx).
///
/// `data` is the decoded payload; callers pick its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T = serde_json::Value> {
    pub status: u32,
    /// Header lines in the order received. Names keep their original case.
    pub headers: Vec<(String, String)>,
    pub data: T,
}

impl<T> Response<T> {
    pub fn new(status: u32, data: T) -> Self {
        Self {
            status,
            headers: Vec::new(),
            data,
        }
    }

    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

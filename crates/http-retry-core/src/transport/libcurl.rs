//! libcurl-backed transport.
//!
//! Each attempt runs a blocking `curl::easy::Easy` transfer on tokio's blocking
//! pool, collects headers and body, maps non-2xx statuses to errors and decodes
//! the body as JSON.

use super::{Transport, TransportError};
use crate::request::{Method, RequestSpec};
use crate::response::Response;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::str;
use std::time::Duration;

/// Timeouts and redirect limits applied to every transfer.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Whole-transfer timeout when the request does not set one.
    pub default_timeout: Duration,
    pub max_redirections: u32,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            default_timeout: Duration::from_secs(30),
            max_redirections: 10,
        }
    }
}

/// [`Transport`] built on libcurl's easy interface.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CurlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CurlOptions {
        &self.options
    }
}

#[async_trait]
impl Transport for CurlTransport {
    type Error = TransportError;

    async fn perform<T>(&self, spec: &RequestSpec) -> Result<Response<T>, TransportError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let spec = spec.clone();
        let options = self.options;
        let raw = tokio::task::spawn_blocking(move || transfer(&spec, options)).await??;
        decode(raw)
    }
}

/// Undecoded 2xx response.
#[derive(Debug)]
struct RawResponse {
    status: u32,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Runs one blocking transfer. Non-2xx statuses come back as `Err`.
fn transfer(spec: &RequestSpec, options: CurlOptions) -> Result<RawResponse, TransportError> {
    let parsed = url::Url::parse(&spec.url)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(TransportError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    let method = spec.effective_method();
    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str())?;
    easy.follow_location(true)?;
    easy.max_redirections(options.max_redirections)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.timeout(spec.timeout.unwrap_or(options.default_timeout))?;

    match method {
        Method::Get => easy.get(true)?,
        Method::Head => easy.nobody(true)?,
        Method::Post | Method::Put | Method::Patch => {
            easy.post_fields_copy(spec.body.as_deref().unwrap_or(&[]))?;
        }
        Method::Options | Method::Delete => {
            if let Some(body) = spec.body.as_deref() {
                easy.post_fields_copy(body)?;
            }
        }
    }
    if !matches!(method, Method::Get | Method::Head | Method::Post) {
        easy.custom_request(method.as_str())?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &spec.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !spec.headers.is_empty() {
        easy.http_headers(list)?;
    }

    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        tracing::debug!("{} {} returned HTTP {}", method, spec.url, status);
        return Err(TransportError::Status { status, body });
    }

    Ok(RawResponse {
        status,
        headers: parse_header_lines(&header_lines),
        body,
    })
}

/// Keeps only the header block of the final response (redirect hops reset it).
fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}

/// Decodes the body as JSON; an empty body decodes as `null`. A body that is
/// not JSON is offered to `T` as a JSON string, so text payloads still land in
/// `Value::String` or `String`. `Decode` only when both readings fail.
fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<Response<T>, TransportError> {
    let json: &[u8] = if raw.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &raw.body
    };
    let data = match serde_json::from_slice(json) {
        Ok(data) => data,
        Err(e) => {
            let Ok(text) = str::from_utf8(&raw.body) else {
                return Err(e.into());
            };
            serde_json::from_value(serde_json::Value::String(text.to_string())).map_err(|_| e)?
        }
    };
    Ok(Response {
        status: raw.status,
        headers: raw.headers,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_keep_final_block_only() {
        let lines = [
            "HTTP/1.1 301 Moved Permanently".to_string(),
            "Location: /next".to_string(),
            "".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "Content-Type: application/json".to_string(),
            "ETag: \"v1\"".to_string(),
        ];
        let headers = parse_header_lines(&lines);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0], ("Content-Type".into(), "application/json".into()));
        assert_eq!(headers[1].1, "\"v1\"");
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let raw = RawResponse {
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        };
        let r: Response<Option<serde_json::Value>> = decode(raw).unwrap();
        assert_eq!(r.status, 204);
        assert!(r.data.is_none());
    }

    fn raw(body: &[u8]) -> RawResponse {
        RawResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn text_body_becomes_json_string() {
        let r: Response<serde_json::Value> = decode(raw(b"hello world")).unwrap();
        assert_eq!(r.data, serde_json::Value::String("hello world".into()));
        let html: Response<String> = decode(raw(b"<html></html>")).unwrap();
        assert_eq!(html.data, "<html></html>");
    }

    #[test]
    fn empty_body_into_string_is_empty() {
        let r: Response<String> = decode(raw(b"")).unwrap();
        assert_eq!(r.data, "");
    }

    #[test]
    fn json_body_still_decodes_as_json() {
        let r: Response<serde_json::Value> = decode(raw(br#"{"n":1}"#)).unwrap();
        assert_eq!(r.data["n"], 1);
    }

    #[test]
    fn text_into_number_is_decode_error() {
        let err = decode::<u32>(raw(b"not a number")).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn non_utf8_body_is_decode_error() {
        let err = decode::<serde_json::Value>(raw(&[0xff, 0xfe, 0x00])).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let spec = RequestSpec::new("ftp://example.com/file");
        let err = transfer(&spec, CurlOptions::default()).unwrap_err();
        assert!(matches!(err, TransportError::UnsupportedScheme(ref s) if s == "ftp"));
    }
}

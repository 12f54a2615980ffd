//! HTTP response handling.
//!
//! [`Response`] is the buffered answer of an [`HttpClient`](crate::HttpClient);
//! [`Request`](crate::Request) classifies it into a success payload or an
//! [`Error`](crate::Error).

use std::collections::HashMap;

use bytes::Bytes;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Seconds to wait before retrying, from the `Retry-After` header.
    ///
    /// Only the delay-seconds form is understood.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse().ok())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, B) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is in the set the web API is documented to return.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        crate::status::is_recognized(self.status)
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, Bytes::from(r#"{"id":"1"}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(response.is_recognized());
    }

    #[test]
    fn response_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), " 7 ".to_string());
        let response = Response::new(429, headers, Bytes::new());
        assert_eq!(response.retry_after(), Some(7));

        let mut headers = HashMap::new();
        headers.insert(
            "Retry-After".to_string(),
            "Wed, 21 Oct 2015 07:28:00 GMT".to_string(),
        );
        let response = Response::new(429, headers, Bytes::new());
        assert_eq!(response.retry_after(), None);
    }

    #[test]
    fn response_unrecognized() {
        let response = Response::new(418, HashMap::new(), Bytes::new());
        assert!(!response.is_success());
        assert!(!response.is_recognized());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Artist {
            id: String,
            name: String,
        }

        let body = Bytes::from(r#"{"id":"0TnOYISbd1XYRBk9myaseg","name":"Pitbull"}"#);
        let response = Response::new(200, HashMap::new(), body);

        let artist: Artist = response.json().expect("deserialize");
        assert_eq!(artist.name, "Pitbull");
    }

    #[test]
    fn response_text() {
        let response = Response::new(200, HashMap::new(), Bytes::from("plain"));
        assert_eq!(response.text().expect("text"), "plain");
    }
}

//! Web API requests.
//!
//! A [`Request`] is the mutable description of one call: method, target,
//! parameters, optional body and a weak reference to a credential.
//! [`Request::prepare`] turns it into the wire-ready [`PreparedRequest`], and
//! the `perform*` methods execute it once through an [`HttpClient`] and
//! classify the response.
//!
//! # Example
//!
//! ```
//! use spotkit_core::{Method, Parameters, Request};
//!
//! let request = Request::new(
//!     Method::Get,
//!     "https://api.spotify.com/v1/albums/5DLhV9yOvZ7IxVmljMXtNm/tracks?market=AU&limit=3",
//!     Parameters::new().with("offset", 3).with("market", "US"),
//! )
//! .expect("valid request");
//!
//! assert_eq!(request.parameters().len(), 3);
//! assert_eq!(
//!     request.prepare().url().as_str(),
//!     "https://api.spotify.com/v1/albums/5DLhV9yOvZ7IxVmljMXtNm/tracks?limit=3&market=US&offset=3"
//! );
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, AuthError, ContentType, Credential, EncoderConfig, Error, Hosts, HttpClient, Method,
    PagingCollection, ParamValue, Parameters, Response, Result,
};

// ============================================================================
// Prepared Request
// ============================================================================

/// The wire-ready form of a [`Request`]: final URL, headers and body.
#[derive(Debug, Clone)]
pub struct PreparedRequest<B = Bytes> {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> PreparedRequest<B> {
    /// Creates a new [`PreparedRequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: Url) -> PreparedRequestBuilder<B> {
        PreparedRequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Final URL, query included.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Rebuild from parts, e.g. after a middleware changed the headers.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: Url,
        headers: HashMap<String, String>,
        body: Option<B>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Builder for constructing [`PreparedRequest`] instances.
#[derive(Debug, Clone)]
pub struct PreparedRequestBuilder<B = Bytes> {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> PreparedRequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`PreparedRequest`].
    #[must_use]
    pub fn build(self) -> PreparedRequest<B> {
        PreparedRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// One call to the web API or the accounts service.
///
/// Construction fails unless the target belongs to one of the permitted
/// [`Hosts`]. Query items already present on the target URL are merged into
/// the parameters, explicitly supplied parameters winning on conflict, and
/// the stored URL keeps only scheme, host and path.
///
/// Preparing is a pure function of the current state, except for the bearer
/// token which is read from the credential at that moment.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    parameters: Parameters,
    hosts: Hosts,
    encoder: EncoderConfig,
    credential: Option<Weak<dyn Credential>>,
    body: Option<(Bytes, ContentType)>,
}

impl Request {
    /// Create a request for a full URL on the production hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not parse or its host is neither the
    /// API nor the accounts host.
    pub fn new(method: Method, url: &str, parameters: Parameters) -> Result<Self> {
        Self::from_url(&Hosts::default(), method, Url::parse(url)?, parameters)
    }

    /// Create a request for an endpoint path of the production API host.
    ///
    /// Accepts `/v1/albums`, `v1/albums` or a full URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not resolve to a permitted host.
    pub fn endpoint(method: Method, endpoint: &str, parameters: Parameters) -> Result<Self> {
        Self::resolve(&Hosts::default(), method, endpoint, parameters)
    }

    /// Create a request for an endpoint path resolved against `hosts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not resolve to a permitted host.
    pub fn resolve(
        hosts: &Hosts,
        method: Method,
        endpoint: &str,
        parameters: Parameters,
    ) -> Result<Self> {
        let url = hosts.resolve(endpoint)?;
        Self::from_url(hosts, method, url, parameters)
    }

    /// Create a request for a full URL validated against `hosts`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if the URL's origin is not permitted.
    pub fn from_url(
        hosts: &Hosts,
        method: Method,
        mut url: Url,
        mut parameters: Parameters,
    ) -> Result<Self> {
        hosts.validate(&url)?;

        for (key, value) in url.query_pairs() {
            parameters.insert_missing(key.into_owned(), value.into_owned());
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            method,
            url,
            parameters,
            hosts: hosts.clone(),
            encoder: EncoderConfig::default(),
            credential: None,
            body: None,
        })
    }

    /// Replace the encoder configuration used when preparing.
    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set a parameter, replacing any previous value for the key.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Attach a credential.
    ///
    /// Only a weak reference is kept: once every strong reference is gone
    /// the request is sent without authorization.
    #[must_use]
    pub fn authorize(mut self, credential: &Arc<dyn Credential>) -> Self {
        self.credential = Some(Arc::downgrade(credential));
        self
    }

    /// Attach a body with its content type.
    #[must_use]
    pub fn add_body(mut self, data: impl Into<Bytes>, content_type: ContentType) -> Self {
        self.body = Some((data.into(), content_type));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn add_json<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.add_body(body, ContentType::Json))
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, without query.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Parameters, including those merged from the original URL.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Mutable access to the parameters.
    #[must_use]
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// Permitted hosts this request was validated against.
    #[must_use]
    pub const fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    /// Encoder configuration.
    #[must_use]
    pub const fn encoder(&self) -> &EncoderConfig {
        &self.encoder
    }

    /// Attached body and its content type.
    #[must_use]
    pub fn body(&self) -> Option<(&Bytes, ContentType)> {
        self.body.as_ref().map(|(data, content_type)| (data, *content_type))
    }

    /// The final URL: target plus encoded parameters.
    #[must_use]
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        let query = self.parameters.to_query(&self.encoder);
        url.set_query(query.as_deref());
        url
    }

    /// Build the wire-ready request.
    ///
    /// The bearer token is read from the credential now; without a token the
    /// `Authorization` header is simply omitted.
    #[must_use]
    pub fn prepare(&self) -> PreparedRequest {
        let url = self.full_url();
        let mut builder = PreparedRequest::builder(self.method, url);

        let token = self
            .credential
            .as_ref()
            .and_then(Weak::upgrade)
            .and_then(|credential| credential.access_token());
        let authorized = token.is_some();
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        if let Some((data, content_type)) = &self.body {
            builder = builder
                .header("Content-Type", content_type.as_str())
                .body(data.clone());
        }

        let prepared = builder.build();
        tracing::trace!(
            method = %prepared.method(),
            url = %prepared.url(),
            authorized,
            "prepared request"
        );
        prepared
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Perform the request once and return the raw success payload.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or the classification error of the
    /// response (see [`Request::classify`]).
    pub async fn perform<C: HttpClient>(&self, client: &C) -> Result<Bytes> {
        let response = client.execute(self.prepare()).await?;
        Self::classify(response)
    }

    /// Perform the request and decode the payload as `T`.
    ///
    /// # Errors
    ///
    /// As [`Request::perform`], plus decode errors.
    pub async fn perform_json<T, C>(&self, client: &C) -> Result<T>
    where
        T: DeserializeOwned,
        C: HttpClient,
    {
        let body = self.perform(client).await?;
        crate::from_json(&body)
    }

    /// Perform the request and decode a list, bare or wrapped in a
    /// single-key object.
    ///
    /// # Errors
    ///
    /// As [`Request::perform`], plus decode errors.
    pub async fn perform_list<T, C>(&self, client: &C) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        C: HttpClient,
    {
        let body = self.perform(client).await?;
        crate::from_json_list(&body)
    }

    /// Perform the request and decode a page, validating its links against
    /// this request's hosts.
    ///
    /// # Errors
    ///
    /// As [`Request::perform`], plus decode errors.
    pub async fn perform_page<P, C>(&self, client: &C) -> Result<P>
    where
        P: PagingCollection,
        C: HttpClient,
    {
        let body = self.perform(client).await?;
        P::from_response(&body, &self.hosts)
    }

    /// Perform the request, discarding the payload.
    ///
    /// # Errors
    ///
    /// As [`Request::perform`].
    pub async fn perform_unit<C: HttpClient>(&self, client: &C) -> Result<()> {
        self.perform(client).await.map(drop)
    }

    /// Classify a response into its success payload or an error.
    ///
    /// In order:
    /// 1. a status outside [`status::RECOGNIZED`](crate::status::RECOGNIZED)
    ///    is [`Error::UnrecognizedStatus`];
    /// 2. an API error envelope is [`Error::Api`], with the `Retry-After`
    ///    hint on 429;
    /// 3. an authentication error envelope is [`Error::Auth`];
    /// 4. otherwise the body is the payload, whatever the status.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn classify(response: Response<Bytes>) -> Result<Bytes> {
        let status = response.status();

        if !response.is_recognized() {
            tracing::debug!(status, "unrecognized status");
            return Err(Error::unrecognized_status(status, response.into_body()));
        }

        if let Some(api) = ApiError::from_body(response.body()) {
            let retry_after = if status == 429 {
                response.retry_after()
            } else {
                None
            };
            tracing::debug!(status, message = %api.message, "api error");
            return Err(Error::Api(api.with_retry_after(retry_after)));
        }

        if let Some(auth) = AuthError::from_body(response.body()) {
            tracing::debug!(status, error = %auth.error, "authentication error");
            return Err(Error::Auth(auth));
        }

        tracing::debug!(status, bytes = response.body().len(), "success");
        Ok(response.into_body())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert2::{check, let_assert};

    use super::*;

    const ALBUM_TRACKS: &str =
        "https://api.spotify.com/v1/albums/5DLhV9yOvZ7IxVmljMXtNm/tracks?market=AU&limit=3";

    /// Replies with a canned response and records what it was asked.
    struct CannedClient {
        status: u16,
        headers: HashMap<String, String>,
        body: &'static str,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl CannedClient {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                headers: HashMap::new(),
                body,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn with_header(mut self, name: &str, value: &str) -> Self {
            self.headers.insert(name.to_string(), value.to_string());
            self
        }

        fn calls(&self) -> usize {
            self.seen.lock().expect("lock").len()
        }
    }

    impl HttpClient for CannedClient {
        async fn execute(&self, request: PreparedRequest) -> Result<Response<Bytes>> {
            self.seen.lock().expect("lock").push(request);
            Ok(Response::new(
                self.status,
                self.headers.clone(),
                Bytes::from_static(self.body.as_bytes()),
            ))
        }
    }

    fn token(value: &'static str) -> Arc<dyn Credential> {
        Arc::new(move || Some(value.to_string()))
    }

    #[test]
    fn explicit_parameters_win_over_url_query() {
        let request = Request::new(
            Method::Get,
            ALBUM_TRACKS,
            Parameters::new().with("offset", 3).with("market", "US"),
        )
        .expect("request");

        check!(request.parameters().len() == 3);
        check!(request.parameters().get("market") == Some(&ParamValue::from("US")));
        check!(request.parameters().get("limit") == Some(&ParamValue::from("3")));
        check!(request.url().query().is_none());
    }

    #[test]
    fn url_query_fills_missing_parameters() {
        let request = Request::new(
            Method::Get,
            "https://api.spotify.com/v1/albums/ID?market=US",
            Parameters::new().with("offset", 3),
        )
        .expect("request");

        check!(request.parameters().len() == 2);
        insta::assert_snapshot!(
            request.prepare().url().as_str(),
            @"https://api.spotify.com/v1/albums/ID?market=US&offset=3"
        );
    }

    #[test]
    fn url_query_values_survive_preparation() {
        let request = Request::new(
            Method::Get,
            "https://api.spotify.com/v1/search?q=C%2B%2B&type=album",
            Parameters::new(),
        )
        .expect("request");
        check!(request.parameters().get("q") == Some(&ParamValue::from("C++")));

        let prepared = request.prepare();
        insta::assert_snapshot!(
            prepared.url().as_str(),
            @"https://api.spotify.com/v1/search?q=C%2B%2B&type=album"
        );
        let sent: Vec<(String, String)> = prepared.url().query_pairs().into_owned().collect();
        check!(sent == [("q".to_string(), "C++".to_string()), ("type".to_string(), "album".to_string())]);
    }

    #[test]
    fn text_with_plus_and_spaces_reaches_the_server_intact() {
        let request = Request::endpoint(
            Method::Get,
            "v1/search",
            Parameters::new().with("q", "C++ guide"),
        )
        .expect("request");

        let prepared = request.prepare();
        check!(prepared.url().query() == Some("q=C%2B%2B+guide"));
        let_assert!(Some((_, value)) = prepared.url().query_pairs().next());
        check!(value == "C++ guide");
    }

    #[test]
    fn endpoint_forms() {
        let expected = "https://api.spotify.com/v1/albums/5DLhV9yOvZ7IxVmljMXtNm";
        for endpoint in [
            "/v1/albums/5DLhV9yOvZ7IxVmljMXtNm",
            "v1/albums/5DLhV9yOvZ7IxVmljMXtNm",
            expected,
        ] {
            let request =
                Request::endpoint(Method::Get, endpoint, Parameters::new()).expect("request");
            check!(request.url().as_str() == expected);
        }
    }

    #[test]
    fn foreign_hosts_are_rejected() {
        for url in [
            "https://example.com/v1/albums",
            "https://api.spotify.com.evil.io/v1/albums",
            "http://api.spotify.com/v1/albums",
        ] {
            let_assert!(Err(Error::InvalidHost { .. }) = Request::new(Method::Get, url, Parameters::new()));
        }
        let_assert!(
            Err(Error::InvalidHost { .. }) =
                Request::endpoint(Method::Get, "https://example.com/v1", Parameters::new())
        );
        let_assert!(Err(Error::InvalidUrl(_)) = Request::new(Method::Get, "not a url", Parameters::new()));
    }

    #[test]
    fn accounts_host_is_permitted() {
        let request = Request::new(
            Method::Post,
            "https://accounts.spotify.com/api/token",
            Parameters::new(),
        );
        check!(request.is_ok());
    }

    #[test]
    fn prepare_without_credential() {
        let request = Request::endpoint(
            Method::Get,
            "v1/albums/5DLhV9yOvZ7IxVmljMXtNm",
            Parameters::new().with("market", "US"),
        )
        .expect("request");

        let prepared = request.prepare();
        check!(prepared.method() == Method::Get);
        check!(prepared.header("Authorization").is_none());
        check!(prepared.body().is_none());
        insta::assert_snapshot!(
            prepared.url().as_str(),
            @"https://api.spotify.com/v1/albums/5DLhV9yOvZ7IxVmljMXtNm?market=US"
        );
    }

    #[test]
    fn prepare_encodes_parameters() {
        let request = Request::endpoint(
            Method::Get,
            "v1/search",
            Parameters::new()
                .with("q", "roadhouse blues")
                .with("type", vec!["album", "artist"])
                .with("year", 1960..=1969),
        )
        .expect("request");

        insta::assert_snapshot!(
            request.prepare().url().as_str(),
            @"https://api.spotify.com/v1/search?q=roadhouse+blues&type=album,artist&year=1960-1969"
        );
    }

    #[test]
    fn prepare_is_repeatable() {
        let request = Request::new(Method::Get, ALBUM_TRACKS, Parameters::new()).expect("request");
        check!(request.prepare().url() == request.prepare().url());
    }

    #[test]
    fn prepare_reads_current_token() {
        let current = Arc::new(Mutex::new(Some("first".to_string())));
        let source = Arc::clone(&current);
        let credential: Arc<dyn Credential> =
            Arc::new(move || source.lock().expect("lock").clone());

        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new())
            .expect("request")
            .authorize(&credential);
        check!(request.prepare().header("Authorization") == Some("Bearer first"));

        *current.lock().expect("lock") = Some("second".to_string());
        check!(request.prepare().header("Authorization") == Some("Bearer second"));

        *current.lock().expect("lock") = None;
        check!(request.prepare().header("Authorization").is_none());
    }

    #[test]
    fn dropped_credential_is_not_used() {
        let credential = token("secret");
        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new())
            .expect("request")
            .authorize(&credential);
        drop(credential);

        check!(request.prepare().header("Authorization").is_none());
    }

    #[test]
    fn prepare_with_json_body() {
        #[derive(serde::Serialize)]
        struct NewPlaylist {
            name: &'static str,
            public: bool,
        }

        let request = Request::endpoint(Method::Post, "v1/users/wizzler/playlists", Parameters::new())
            .expect("request")
            .add_json(&NewPlaylist {
                name: "Road trip",
                public: false,
            })
            .expect("json");

        let prepared = request.prepare();
        check!(prepared.header("Content-Type") == Some("application/json"));
        let_assert!(Some(body) = prepared.body());
        check!(body.as_ref() == br#"{"name":"Road trip","public":false}"#);
    }

    #[test]
    fn prepare_with_jpeg_body() {
        let request = Request::endpoint(Method::Put, "v1/playlists/ID/images", Parameters::new())
            .expect("request")
            .add_body(Bytes::from_static(b"/9j/"), ContentType::Jpeg);

        check!(request.prepare().header("Content-Type") == Some("image/jpeg"));
    }

    #[tokio::test]
    async fn perform_returns_payload() {
        let client = CannedClient::new(200, r#"{"id":"1"}"#);
        let request = Request::endpoint(Method::Get, "v1/albums/1", Parameters::new()).expect("request");

        let body = request.perform(&client).await.expect("payload");
        check!(body.as_ref() == br#"{"id":"1"}"#);
        check!(client.calls() == 1);
    }

    #[tokio::test]
    async fn api_error_envelope_takes_precedence() {
        let client = CannedClient::new(
            401,
            r#"{"error":{"status":401,"message":"The access token expired"}}"#,
        );
        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new()).expect("request");

        let_assert!(Err(Error::Api(api)) = request.perform(&client).await);
        check!(api.status == 401);
        check!(api.message == "The access token expired");
        check!(api.retry_after.is_none());
    }

    #[tokio::test]
    async fn api_error_envelope_on_success_status() {
        let client = CannedClient::new(200, r#"{"error":{"status":400,"message":"Bad id"}}"#);
        let request = Request::endpoint(Method::Get, "v1/albums/x", Parameters::new()).expect("request");

        let_assert!(Err(Error::Api(api)) = request.perform_json::<serde_json::Value, _>(&client).await);
        check!(api.status == 400);
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let client = CannedClient::new(
            429,
            r#"{"error":{"status":429,"message":"API rate limit exceeded"}}"#,
        )
        .with_header("retry-after", "12");
        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new()).expect("request");

        let_assert!(Err(err) = request.perform(&client).await);
        check!(err.status() == Some(429));
        check!(err.as_api().and_then(|api| api.retry_after) == Some(12));
    }

    #[tokio::test]
    async fn auth_error_envelope() {
        let client = CannedClient::new(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#,
        );
        let request = Request::new(
            Method::Post,
            "https://accounts.spotify.com/api/token",
            Parameters::new(),
        )
        .expect("request");

        let_assert!(Err(Error::Auth(auth)) = request.perform(&client).await);
        check!(auth.error == "invalid_grant");
        check!(auth.description == "Invalid authorization code");
    }

    #[tokio::test]
    async fn unrecognized_status_is_reported() {
        let client = CannedClient::new(418, "teapot");
        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new()).expect("request");

        let_assert!(Err(Error::UnrecognizedStatus { status, body }) = request.perform(&client).await);
        check!(status == 418);
        check!(body.as_ref() == b"teapot");
    }

    #[tokio::test]
    async fn error_status_without_envelope_is_payload() {
        let client = CannedClient::new(404, "<html>nope</html>");
        let request = Request::endpoint(Method::Get, "v1/me", Parameters::new()).expect("request");

        let_assert!(Ok(body) = request.perform(&client).await);
        check!(body.as_ref() == b"<html>nope</html>");

        // Typed decoding of such a payload fails as a decode error.
        let_assert!(Err(err) = request.perform_json::<serde_json::Value, _>(&client).await);
        check!(err.is_decode());
    }

    #[tokio::test]
    async fn perform_unit_accepts_empty_no_content() {
        let client = CannedClient::new(204, "");
        let request = Request::endpoint(Method::Delete, "v1/me/albums", Parameters::new().with("ids", "1"))
            .expect("request");

        check!(request.perform_unit(&client).await.is_ok());
    }

    #[tokio::test]
    async fn perform_list_tolerates_wrapped_arrays() {
        let client = CannedClient::new(200, r#"{"albums":[{"id":"1"},{"id":"2"}]}"#);
        let request = Request::endpoint(Method::Get, "v1/albums", Parameters::new().with("ids", vec!["1", "2"]))
            .expect("request");

        let albums: Vec<serde_json::Value> = request.perform_list(&client).await.expect("albums");
        check!(albums.len() == 2);
    }

    #[tokio::test]
    async fn perform_json_reports_decode_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Album {
            #[allow(dead_code)]
            name: String,
        }

        let client = CannedClient::new(200, r#"{"name":7}"#);
        let request = Request::endpoint(Method::Get, "v1/albums/1", Parameters::new()).expect("request");

        let_assert!(Err(err) = request.perform_json::<Album, _>(&client).await);
        check!(err.is_decode());
        check!(err.decode_path() == Some("name"));
    }
}

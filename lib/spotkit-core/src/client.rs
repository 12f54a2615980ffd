//! Client traits.
//!
//! - [`HttpClient`] - Low-level HTTP execution of a [`PreparedRequest`]
//! - [`Credential`] - Source of the bearer token, read at every preparation
//! - [`WebApiClient`] - Transport bound to a host pair and an optional credential
//!
//! Implement [`HttpClient`] directly for custom transports or test doubles.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Hosts, Method, Parameters, PreparedRequest, Request, Response, Result};

/// Core HTTP client trait.
///
/// Each call to [`execute`](HttpClient::execute) issues exactly one network
/// exchange. Implementations should be async-first and support connection
/// pooling; a [`Request`] only ever borrows its client.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails at the transport level:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// A source of OAuth access tokens.
///
/// Requests keep only a weak reference to their credential and ask it for a
/// token each time they are prepared, so a refreshed token is picked up by
/// requests built before the refresh.
pub trait Credential: Send + Sync {
    /// The current access token, or `None` when there is none (or it expired).
    fn access_token(&self) -> Option<String>;
}

impl<F> Credential for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

// ============================================================================
// Web API Client Trait
// ============================================================================

/// A transport bound to the permitted hosts and, optionally, a credential.
///
/// Paging collections use this to follow their `next`/`previous` links with
/// the same hosts and authorization as the request that produced them.
///
/// # Example
///
/// ```ignore
/// use spotkit::{Method, Parameters, WebApiClient};
///
/// let request = client.request(
///     Method::Get,
///     "v1/albums/4aawyAB9vmqN3uQ7FjRGTy",
///     Parameters::new().with("market", "US"),
/// )?;
/// let album: Album = request.perform_json(&client).await?;
/// ```
pub trait WebApiClient: HttpClient {
    /// The permitted origins.
    fn hosts(&self) -> &Hosts;

    /// The credential attached to requests built by [`WebApiClient::request`].
    fn credential(&self) -> Option<&Arc<dyn Credential>>;

    /// Build a request for an endpoint path or a full URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not resolve to one of the
    /// permitted hosts.
    fn request(&self, method: Method, endpoint: &str, parameters: Parameters) -> Result<Request> {
        let request = Request::resolve(self.hosts(), method, endpoint, parameters)?;
        Ok(match self.credential() {
            Some(credential) => request.authorize(credential),
            None => request,
        })
    }
}

impl<C: WebApiClient> WebApiClient for &C {
    fn hosts(&self) -> &Hosts {
        (**self).hosts()
    }

    fn credential(&self) -> Option<&Arc<dyn Credential>> {
        (**self).credential()
    }
}

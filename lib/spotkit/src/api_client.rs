//! Web API client wrapper.
//!
//! [`ApiClient`] combines any [`HttpClient`] with the permitted [`Hosts`] and
//! an optional [`Credential`] to create a [`WebApiClient`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Credential, Hosts, HttpClient, PreparedRequest, Response, Result, WebApiClient};

/// Web API client wrapper.
///
/// Requests built with [`WebApiClient::request`] are resolved against the
/// client's hosts and authorized with its credential. The transport itself
/// (with its connection pool and middleware) can be shared between clients.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use spotkit::{ApiClient, HyperClient, Method, Parameters, Session, WebApiClient};
///
/// let session = Arc::new(Session::new("wizzler", token));
/// let client = ApiClient::new(HyperClient::new()).with_credential(session);
///
/// let request = client.request(Method::Get, "v1/me", Parameters::new())?;
/// let user: serde_json::Value = request.perform_json(&client).await?;
/// ```
pub struct ApiClient<C> {
    client: C,
    hosts: Hosts,
    credential: Option<Arc<dyn Credential>>,
}

impl<C: fmt::Debug> fmt::Debug for ApiClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &self.client)
            .field("hosts", &self.hosts)
            .field("authorized", &self.credential.is_some())
            .finish()
    }
}

impl<C: Clone> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            hosts: self.hosts.clone(),
            credential: self.credential.clone(),
        }
    }
}

impl<C> ApiClient<C> {
    /// Create an unauthorized client for the production hosts.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_hosts(client, Hosts::default())
    }

    /// Create an unauthorized client for the given hosts.
    #[must_use]
    pub const fn with_hosts(client: C, hosts: Hosts) -> Self {
        Self {
            client,
            hosts,
            credential: None,
        }
    }

    /// Attach a credential to every request built by this client.
    #[must_use]
    pub fn with_credential(mut self, credential: Arc<dyn Credential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: HttpClient> HttpClient for ApiClient<C> {
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.client.execute(request)
    }
}

impl<C: HttpClient> WebApiClient for ApiClient<C> {
    fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    fn credential(&self) -> Option<&Arc<dyn Credential>> {
        self.credential.as_ref()
    }
}

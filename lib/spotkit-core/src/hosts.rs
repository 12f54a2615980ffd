//! The two origins a request may target.
//!
//! Every [`Request`](crate::Request) is validated against a [`Hosts`] pair at
//! construction time, and paging links are validated against the same pair
//! when a page is decoded.

use std::sync::LazyLock;

use url::Url;

use crate::{Error, Result};

/// Origin of the web API.
pub const API_HOST: &str = "https://api.spotify.com";

/// Origin of the accounts (authentication) service.
pub const ACCOUNTS_HOST: &str = "https://accounts.spotify.com";

#[allow(clippy::expect_used)]
static PRODUCTION: LazyLock<Hosts> = LazyLock::new(|| {
    Hosts::new(API_HOST, ACCOUNTS_HOST).expect("production hosts are valid URLs")
});

/// The pair of permitted origins: the web API and the accounts service.
///
/// Matching compares the full origin (scheme, host and port), so a test
/// server can stand in for either host through [`Hosts::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    api: Url,
    accounts: Url,
}

impl Default for Hosts {
    fn default() -> Self {
        PRODUCTION.clone()
    }
}

impl Hosts {
    /// Create a host pair from the API and accounts base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL cannot be parsed, or is not a
    /// hierarchical URL with a host.
    pub fn new(api: impl AsRef<str>, accounts: impl AsRef<str>) -> Result<Self> {
        let api = parse_origin(api.as_ref())?;
        let accounts = parse_origin(accounts.as_ref())?;
        Ok(Self { api, accounts })
    }

    /// Base URL of the web API.
    #[must_use]
    pub const fn api(&self) -> &Url {
        &self.api
    }

    /// Base URL of the accounts service.
    #[must_use]
    pub const fn accounts(&self) -> &Url {
        &self.accounts
    }

    /// Returns `true` if `url` belongs to one of the two permitted origins.
    #[must_use]
    pub fn permits(&self, url: &Url) -> bool {
        let origin = url.origin();
        origin == self.api.origin() || origin == self.accounts.origin()
    }

    /// Ensure `url` belongs to one of the two permitted origins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] otherwise.
    pub fn validate(&self, url: &Url) -> Result<()> {
        if self.permits(url) {
            Ok(())
        } else {
            Err(Error::invalid_host(url.as_str()))
        }
    }

    /// Resolve an endpoint against the API host.
    ///
    /// Accepts `/v1/albums`, `v1/albums` or a full URL; the result is not yet
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not form a valid URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        Ok(self.api.join(endpoint)?)
    }
}

fn parse_origin(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(Error::invalid_host(raw));
    }
    Ok(url)
}

//! Request factories for a few catalog endpoints.
//!
//! Each endpoint comes in two flavours: `*_request` builds the [`Request`]
//! so it can be inspected or performed later, and the plain method performs
//! it and decodes the result.

use chrono::{DateTime, Utc};

use crate::model::{Album, AlbumType, FeaturedPlaylists, RecentlyPlayed, SearchResults, Track};
use crate::{
    Method, Page, Pagination, Parameters, RawString, Request, Result, ToParameters, UnixMillis,
    WebApiClient,
};

/// What a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, RawString)]
#[raw(rename_all = "lowercase")]
pub enum SearchType {
    /// Albums.
    Album,
    /// Artists.
    Artist,
    /// Playlists.
    Playlist,
    /// Tracks.
    Track,
}

/// Where to start reading the play history.
///
/// The endpoint accepts one edge or the other, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayedCursor {
    /// Tracks played after this instant.
    After(DateTime<Utc>),
    /// Tracks played before this instant.
    Before(DateTime<Utc>),
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Parameters)]
struct MarketQuery<'a> {
    market: Option<&'a str>,
}

#[derive(Debug, Parameters)]
struct IdsQuery<'a> {
    ids: Vec<&'a str>,
    market: Option<&'a str>,
}

#[derive(Debug, Parameters)]
struct ArtistAlbumsQuery<'a> {
    include_groups: Vec<AlbumType>,
    market: Option<&'a str>,
}

#[derive(Debug, Parameters)]
struct NewReleasesQuery<'a> {
    #[param(rename = "country")]
    market: Option<&'a str>,
}

#[derive(Debug, Parameters)]
struct SearchQuery<'a> {
    q: &'a str,
    #[param(rename = "type")]
    kinds: Vec<SearchType>,
    market: Option<&'a str>,
}

#[derive(Debug, Parameters)]
struct RecentlyPlayedQuery {
    after: Option<UnixMillis>,
    before: Option<UnixMillis>,
    limit: Option<u32>,
}

#[derive(Debug, Parameters)]
struct FeaturedPlaylistsQuery<'a> {
    #[param(rename = "country")]
    market: Option<&'a str>,
    locale: Option<&'a str>,
    timestamp: Option<DateTime<Utc>>,
}

/// Parameters of a paged endpoint.
fn paged(query: &impl ToParameters, page: Pagination) -> Parameters {
    let mut parameters = query.to_parameters();
    parameters.extend(page.to_parameters());
    parameters
}

// ============================================================================
// Catalog
// ============================================================================

/// Factories for catalog requests, localized to a market.
///
/// # Example
///
/// ```ignore
/// use spotkit::{AlbumType, Catalog, Pagination};
///
/// let catalog = Catalog::new().with_market("US");
/// let album = catalog.album(&client, "0sNOF9WDwhWunNAHPD3Baj").await?;
/// let singles = catalog
///     .artist_albums(&client, "0OdUWJ0sBjDrqHygGUXeCF", &[AlbumType::Single], Pagination::page(20, 2))
///     .await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    market: Option<String>,
    locale: Option<String>,
}

impl Catalog {
    /// A catalog for all markets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to a market (ISO 3166-1 alpha-2 country code).
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Localize texts (e.g. `es_MX`).
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// The market, if any.
    #[must_use]
    pub fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// The locale, if any.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    // ------------------------------------------------------------------------
    // Albums
    // ------------------------------------------------------------------------

    /// `GET /v1/albums/{id}`.
    pub fn album_request<C: WebApiClient>(&self, client: &C, id: &str) -> Result<Request> {
        let query = MarketQuery {
            market: self.market(),
        };
        client.request(
            Method::Get,
            &format!("v1/albums/{id}"),
            query.to_parameters(),
        )
    }

    /// Get an album.
    pub async fn album<C: WebApiClient>(&self, client: &C, id: &str) -> Result<Album> {
        self.album_request(client, id)?.perform_json(client).await
    }

    /// `GET /v1/albums?ids=...`.
    pub fn albums_request<C: WebApiClient>(&self, client: &C, ids: &[&str]) -> Result<Request> {
        let query = IdsQuery {
            ids: ids.to_vec(),
            market: self.market(),
        };
        client.request(Method::Get, "v1/albums", query.to_parameters())
    }

    /// Get several albums. Unknown IDs come back as `None`.
    pub async fn albums<C: WebApiClient>(
        &self,
        client: &C,
        ids: &[&str],
    ) -> Result<Vec<Option<Album>>> {
        self.albums_request(client, ids)?.perform_list(client).await
    }

    /// `GET /v1/albums/{id}/tracks`.
    pub fn album_tracks_request<C: WebApiClient>(
        &self,
        client: &C,
        id: &str,
        page: Pagination,
    ) -> Result<Request> {
        let query = MarketQuery {
            market: self.market(),
        };
        client.request(
            Method::Get,
            &format!("v1/albums/{id}/tracks"),
            paged(&query, page),
        )
    }

    /// Get a page of an album's tracks (simplified).
    pub async fn album_tracks<C: WebApiClient>(
        &self,
        client: &C,
        id: &str,
        page: Pagination,
    ) -> Result<Page<Track>> {
        self.album_tracks_request(client, id, page)?
            .perform_page(client)
            .await
    }

    /// `GET /v1/artists/{id}/albums`.
    ///
    /// An empty `groups` slice means every album type.
    pub fn artist_albums_request<C: WebApiClient>(
        &self,
        client: &C,
        id: &str,
        groups: &[AlbumType],
        page: Pagination,
    ) -> Result<Request> {
        let query = ArtistAlbumsQuery {
            include_groups: groups.to_vec(),
            market: self.market(),
        };
        client.request(
            Method::Get,
            &format!("v1/artists/{id}/albums"),
            paged(&query, page),
        )
    }

    /// Get a page of an artist's albums (simplified).
    pub async fn artist_albums<C: WebApiClient>(
        &self,
        client: &C,
        id: &str,
        groups: &[AlbumType],
        page: Pagination,
    ) -> Result<Page<Album>> {
        self.artist_albums_request(client, id, groups, page)?
            .perform_page(client)
            .await
    }

    // ------------------------------------------------------------------------
    // Browse
    // ------------------------------------------------------------------------

    /// `GET /v1/browse/new-releases`.
    pub fn new_releases_request<C: WebApiClient>(
        &self,
        client: &C,
        page: Pagination,
    ) -> Result<Request> {
        let query = NewReleasesQuery {
            market: self.market(),
        };
        client.request(
            Method::Get,
            "v1/browse/new-releases",
            paged(&query, page),
        )
    }

    /// Get a page of new album releases (simplified).
    pub async fn new_releases<C: WebApiClient>(
        &self,
        client: &C,
        page: Pagination,
    ) -> Result<Page<Album>> {
        self.new_releases_request(client, page)?
            .perform_page(client)
            .await
    }

    /// `GET /v1/browse/featured-playlists`.
    ///
    /// `timestamp` tailors the selection to a time of day; without it the
    /// server uses its current time.
    pub fn featured_playlists_request<C: WebApiClient>(
        &self,
        client: &C,
        timestamp: Option<DateTime<Utc>>,
        page: Pagination,
    ) -> Result<Request> {
        let query = FeaturedPlaylistsQuery {
            market: self.market(),
            locale: self.locale(),
            timestamp,
        };
        client.request(
            Method::Get,
            "v1/browse/featured-playlists",
            paged(&query, page),
        )
    }

    /// Get featured playlists.
    pub async fn featured_playlists<C: WebApiClient>(
        &self,
        client: &C,
        timestamp: Option<DateTime<Utc>>,
        page: Pagination,
    ) -> Result<FeaturedPlaylists> {
        self.featured_playlists_request(client, timestamp, page)?
            .perform_json(client)
            .await
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// `GET /v1/search`.
    pub fn search_request<C: WebApiClient>(
        &self,
        client: &C,
        query: &str,
        kinds: &[SearchType],
        page: Pagination,
    ) -> Result<Request> {
        let query = SearchQuery {
            q: query,
            kinds: kinds.to_vec(),
            market: self.market(),
        };
        client.request(Method::Get, "v1/search", paged(&query, page))
    }

    /// Search the catalog.
    pub async fn search<C: WebApiClient>(
        &self,
        client: &C,
        query: &str,
        kinds: &[SearchType],
        page: Pagination,
    ) -> Result<SearchResults> {
        self.search_request(client, query, kinds, page)?
            .perform_json(client)
            .await
    }

    // ------------------------------------------------------------------------
    // Player
    // ------------------------------------------------------------------------

    /// `GET /v1/me/player/recently-played`.
    pub fn recently_played_request<C: WebApiClient>(
        &self,
        client: &C,
        cursor: Option<PlayedCursor>,
        limit: Option<u32>,
    ) -> Result<Request> {
        let (after, before) = match cursor {
            Some(PlayedCursor::After(instant)) => (Some(UnixMillis(instant)), None),
            Some(PlayedCursor::Before(instant)) => (None, Some(UnixMillis(instant))),
            None => (None, None),
        };
        let query = RecentlyPlayedQuery {
            after,
            before,
            limit,
        };
        client.request(
            Method::Get,
            "v1/me/player/recently-played",
            query.to_parameters(),
        )
    }

    /// Get the current user's recently played tracks.
    pub async fn recently_played<C: WebApiClient>(
        &self,
        client: &C,
        cursor: Option<PlayedCursor>,
        limit: Option<u32>,
    ) -> Result<RecentlyPlayed> {
        self.recently_played_request(client, cursor, limit)?
            .perform_page(client)
            .await
    }
}

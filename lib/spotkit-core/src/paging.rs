//! Paging collections.
//!
//! The web API pages long results in two ways:
//! - [`Page`]: offset based, with `offset`, `limit`, `total` and links to the
//!   next and previous pages;
//! - [`CursorPage`]: cursor based, with `before`/`after` markers and a link to
//!   the next page only.
//!
//! Both dereference to a slice of their items and implement
//! [`PagingCollection`], which fetches adjacent pages without mutating the
//! current one.

use std::fmt;
use std::future::Future;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use futures_util::Stream;
use futures_util::stream;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::{
    Error, Hosts, Method, ParamValue, Parameters, Request, Result, ToParameters, WebApiClient,
};

// ============================================================================
// Paging Collection Trait
// ============================================================================

/// A page of items decoded from one response, with links to its neighbours.
pub trait PagingCollection: DeserializeOwned + Send + Sync {
    /// Element type.
    type Item;

    /// Items of this page, in server order.
    fn items(&self) -> &[Self::Item];

    /// Requested page size.
    fn limit(&self) -> u32;

    /// URL that produced this page.
    fn href(&self) -> &Url;

    /// Link to the following page, if any.
    fn next_url(&self) -> Option<&Url>;

    /// Link to the preceding page, if any.
    fn previous_url(&self) -> Option<&Url>;

    /// Decode a page, bare or wrapped in a single-key object, and check that
    /// its links stay on the permitted hosts.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the payload is not a page or a link points
    /// to a foreign host.
    fn from_response(bytes: &[u8], hosts: &Hosts) -> Result<Self> {
        let page: Self = crate::from_json_unwrapped(bytes)?;
        for (field, link) in [("next", page.next_url()), ("previous", page.previous_url())] {
            if let Some(url) = link
                && !hosts.permits(url)
            {
                return Err(Error::json_deserialization(
                    field,
                    format!("link to a foreign host: {url}"),
                ));
            }
        }
        Ok(page)
    }

    /// Number of items on this page.
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Returns `true` if this page holds no item.
    ///
    /// An empty page may still link to a next page.
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Position following `index`.
    fn index_after(&self, index: usize) -> usize {
        index + 1
    }

    /// Position preceding `index`, or `None` at the start.
    fn index_before(&self, index: usize) -> Option<usize> {
        index.checked_sub(1)
    }

    /// Fetch the following page.
    ///
    /// Resolves to `Ok(None)` when there is no next link: running out of
    /// pages is not an error.
    fn next_page<C: WebApiClient>(
        &self,
        client: &C,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let link = self.next_url().cloned();
        async move { fetch_link(link, client).await }
    }

    /// Fetch the preceding page.
    ///
    /// Resolves to `Ok(None)` when there is no previous link.
    fn previous_page<C: WebApiClient>(
        &self,
        client: &C,
    ) -> impl Future<Output = Result<Option<Self>>> + Send {
        let link = self.previous_url().cloned();
        async move { fetch_link(link, client).await }
    }
}

async fn fetch_link<P, C>(link: Option<Url>, client: &C) -> Result<Option<P>>
where
    P: PagingCollection,
    C: WebApiClient,
{
    let Some(url) = link else {
        return Ok(None);
    };
    let request = client.request(Method::Get, url.as_str(), Parameters::new())?;
    request.perform_page(client).await.map(Some)
}

enum Step<P> {
    Start(P),
    Next(Url),
    Done,
}

/// Stream every page, starting with `first` and following `next` links.
///
/// Pages are fetched one at a time: the following request is only issued
/// once the consumer polls for it.
///
/// # Example
///
/// ```ignore
/// use futures_util::TryStreamExt;
///
/// let first: Page<SimplifiedTrack> = request.perform_page(&client).await?;
/// let all: Vec<Page<SimplifiedTrack>> = spotkit::paging::pages(first, &client).try_collect().await?;
/// ```
pub fn pages<P, C>(first: P, client: &C) -> impl Stream<Item = Result<P>> + Send + '_
where
    P: PagingCollection + 'static,
    C: WebApiClient,
{
    stream::try_unfold(Step::Start(first), move |step| async move {
        let page = match step {
            Step::Start(page) => page,
            Step::Next(url) => {
                let request = client.request(Method::Get, url.as_str(), Parameters::new())?;
                request.perform_page::<P, _>(client).await?
            }
            Step::Done => return Ok(None),
        };
        let step = page.next_url().cloned().map_or(Step::Done, Step::Next);
        Ok::<_, Error>(Some((page, step)))
    })
}

// ============================================================================
// Offset Page
// ============================================================================

/// Offset-based page.
///
/// Decoding enforces `items.len() <= limit`, and `offset + items.len() <=
/// total` whenever a next link is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPage<T>")]
pub struct Page<T> {
    href: Url,
    items: Vec<T>,
    limit: u32,
    next: Option<Url>,
    offset: u32,
    previous: Option<Url>,
    total: Option<u32>,
}

#[derive(Deserialize)]
struct RawPage<T> {
    href: Url,
    items: Vec<T>,
    limit: u32,
    next: Option<Url>,
    #[serde(default)]
    offset: u32,
    previous: Option<Url>,
    #[serde(default)]
    total: Option<u32>,
}

impl<T> TryFrom<RawPage<T>> for Page<T> {
    type Error = String;

    fn try_from(raw: RawPage<T>) -> std::result::Result<Self, Self::Error> {
        let count = raw.items.len();
        if count > raw.limit as usize {
            return Err(format!(
                "page holds {count} items but its limit is {}",
                raw.limit
            ));
        }
        if let Some(total) = raw.total
            && raw.next.is_some()
            && raw.offset as usize + count > total as usize
        {
            return Err(format!(
                "page ends at {} but the total is {total}",
                raw.offset as usize + count
            ));
        }
        Ok(Self {
            href: raw.href,
            items: raw.items,
            limit: raw.limit,
            next: raw.next,
            offset: raw.offset,
            previous: raw.previous,
            total: raw.total,
        })
    }
}

impl<T> Page<T> {
    /// Position of the first item in the whole result.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of items in the whole result, when reported.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        self.total
    }

    /// One-based number of this page.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }

    /// Number of pages in the whole result, when the total is reported.
    #[must_use]
    pub const fn page_count(&self) -> Option<u32> {
        match self.total {
            Some(total) if self.limit > 0 => Some(total.div_ceil(self.limit)),
            _ => None,
        }
    }

    /// Request for the one-based page `number` of the same result.
    ///
    /// # Errors
    ///
    /// Returns an error if this page's `href` is not on the permitted hosts.
    pub fn page_request(&self, hosts: &Hosts, number: u32) -> Result<Request> {
        let offset = self.limit.saturating_mul(number.saturating_sub(1));
        let parameters = Parameters::new()
            .with("limit", self.limit)
            .with("offset", offset);
        Request::from_url(hosts, Method::Get, self.href.clone(), parameters)
    }

    /// Consume into the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> PagingCollection for Page<T>
where
    T: DeserializeOwned + Send + Sync,
{
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn href(&self) -> &Url {
        &self.href
    }

    fn next_url(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    fn previous_url(&self) -> Option<&Url> {
        self.previous.as_ref()
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Cursor Page
// ============================================================================

/// The edges of a cursor page, in the page's own order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors<C> {
    /// Marker after the last item.
    pub after: Option<C>,
    /// Marker before the first item.
    pub before: Option<C>,
}

impl<C> Cursors<C> {
    /// Most recent edge of a most-recent-first page.
    #[must_use]
    pub const fn latest(&self) -> Option<&C> {
        self.after.as_ref()
    }

    /// Oldest edge of a most-recent-first page.
    #[must_use]
    pub const fn earliest(&self) -> Option<&C> {
        self.before.as_ref()
    }
}

/// Cursor-based page: no offset, no previous link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCursorPage<T, C>")]
pub struct CursorPage<T, C = String> {
    href: Url,
    items: Vec<T>,
    limit: u32,
    next: Option<Url>,
    cursors: Option<Cursors<C>>,
    total: Option<u32>,
}

#[derive(Deserialize)]
struct RawCursorPage<T, C> {
    href: Url,
    items: Vec<T>,
    limit: u32,
    next: Option<Url>,
    cursors: Option<Cursors<C>>,
    total: Option<u32>,
}

impl<T, C> TryFrom<RawCursorPage<T, C>> for CursorPage<T, C> {
    type Error = String;

    fn try_from(raw: RawCursorPage<T, C>) -> std::result::Result<Self, Self::Error> {
        let count = raw.items.len();
        if count > raw.limit as usize {
            return Err(format!(
                "page holds {count} items but its limit is {}",
                raw.limit
            ));
        }
        Ok(Self {
            href: raw.href,
            items: raw.items,
            limit: raw.limit,
            next: raw.next,
            cursors: raw.cursors,
            total: raw.total,
        })
    }
}

impl<T, C> CursorPage<T, C> {
    /// Cursors of this page; absent when the page is empty.
    #[must_use]
    pub const fn cursors(&self) -> Option<&Cursors<C>> {
        self.cursors.as_ref()
    }

    /// Number of items in the whole result, when reported.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        self.total
    }

    /// Consume into the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T, C> PagingCollection for CursorPage<T, C>
where
    T: DeserializeOwned + Send + Sync,
    C: DeserializeOwned + Send + Sync,
{
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn href(&self) -> &Url {
        &self.href
    }

    fn next_url(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    fn previous_url(&self) -> Option<&Url> {
        None
    }
}

impl<T, C> Deref for CursorPage<T, C> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T, C> IntoIterator for CursorPage<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a CursorPage<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Cursor Types
// ============================================================================

/// An instant given as Unix milliseconds, as used by time-ordered cursors.
///
/// Decodes from a string (`"1481661844589"`) or a number; encodes as a
/// string, and as an integer query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixMillis(pub DateTime<Utc>);

impl UnixMillis {
    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Build from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }
}

impl From<DateTime<Utc>> for UnixMillis {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl From<UnixMillis> for ParamValue {
    fn from(instant: UnixMillis) -> Self {
        Self::Int(instant.millis())
    }
}

impl Serialize for UnixMillis {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.millis().to_string())
    }
}

impl<'de> Deserialize<'de> for UnixMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MillisVisitor;

        impl Visitor<'_> for MillisVisitor {
            type Value = UnixMillis;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("Unix milliseconds as a string or an integer")
            }

            fn visit_i64<E: de::Error>(self, millis: i64) -> std::result::Result<UnixMillis, E> {
                UnixMillis::from_millis(millis)
                    .ok_or_else(|| E::custom(format!("timestamp out of range: {millis}")))
            }

            fn visit_u64<E: de::Error>(self, millis: u64) -> std::result::Result<UnixMillis, E> {
                let millis = i64::try_from(millis)
                    .map_err(|_| E::custom(format!("timestamp out of range: {millis}")))?;
                self.visit_i64(millis)
            }

            fn visit_str<E: de::Error>(self, raw: &str) -> std::result::Result<UnixMillis, E> {
                let millis = raw
                    .parse::<i64>()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(raw), &self))?;
                self.visit_i64(millis)
            }
        }

        deserializer.deserialize_any(MillisVisitor)
    }
}

// ============================================================================
// Pagination Parameters
// ============================================================================

/// `limit`/`offset` query parameters for offset-paged endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Page size.
    pub limit: Option<u32>,
    /// Index of the first item.
    pub offset: Option<u32>,
}

impl Pagination {
    /// Explicit page size and offset.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// The one-based page `number` of size `limit`.
    ///
    /// The first page sends no offset.
    #[must_use]
    pub const fn page(limit: u32, number: u32) -> Self {
        let offset = if number > 1 {
            Some(limit.saturating_mul(number - 1))
        } else {
            None
        };
        Self {
            limit: Some(limit),
            offset,
        }
    }
}

impl ToParameters for Pagination {
    fn to_parameters(&self) -> Parameters {
        Parameters::new()
            .with_opt("limit", self.limit)
            .with_opt("offset", self.offset)
    }
}

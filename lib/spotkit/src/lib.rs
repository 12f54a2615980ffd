//! An async client for the Spotify web API.
//!
//! Build a [`Request`], perform it with a transport, and decode the result:
//! objects, lists, or [`Page`]s that follow their own `next` links.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spotkit::prelude::*;
//!
//! let session = Arc::new(Session::new("wizzler", access_token));
//! let client = ApiClient::new(HyperClient::builder().with_defaults().build())
//!     .with_credential(session);
//!
//! let catalog = Catalog::new().with_market("US");
//! let album = catalog.album(&client, "0sNOF9WDwhWunNAHPD3Baj").await?;
//!
//! let first = catalog
//!     .album_tracks(&client, &album.id, Pagination::page(20, 1))
//!     .await?;
//! let mut pages = spotkit::paging::pages(first, &client);
//! while let Some(page) = pages.try_next().await? {
//!     for track in &page {
//!         println!("{}", track.name);
//!     }
//! }
//! ```

// Lets the derive macros refer to `::spotkit` from inside this crate.
extern crate self as spotkit;

mod api_client;
mod catalog;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod model;
pub mod prelude;
mod session;

pub use api_client::ApiClient;
pub use catalog::{Catalog, PlayedCursor, SearchType};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, DEFAULT_USER_AGENT};
pub use model::{AlbumType, Expandable};
pub use session::Session;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use spotkit_core::{
    ACCOUNTS_HOST, API_HOST, ApiError, AuthError, ContentType, Credential, CursorPage, Cursors,
    DEFAULT_DATE_FORMAT, EncoderConfig, EncoderConfigBuilder, Error, Hosts, HttpClient, Method,
    Page, Pagination, PagingCollection, ParamValue, Parameters, PreparedRequest,
    PreparedRequestBuilder, RawString, Request, Response, Result, TimePrecision, ToParameters,
    UnixMillis, WebApiClient, base64_bytes, deserialize_raw_case, from_json, from_json_list,
    from_json_unwrapped, match_raw_case, paging, status, to_json,
};

// Re-export http types for status codes and headers
pub use spotkit_core::{StatusCode, header};

// Re-export crates for macro-generated code
pub use serde;

// Re-export derive macros
pub use spotkit_macro::{Parameters, RawString};

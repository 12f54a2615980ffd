//! Core types and traits for spotkit, a client for the Spotify web API.
//!
//! This crate has no I/O of its own. It provides:
//! - [`ParamValue`], [`Parameters`] and [`EncoderConfig`] - query parameter encoding
//! - [`Hosts`] - the two permitted origins
//! - [`Request`] and [`PreparedRequest`] - request construction, preparation and classification
//! - [`from_json`], [`from_json_list`], [`from_json_unwrapped`], [`to_json`] - JSON codec
//! - [`Page`], [`CursorPage`] and [`PagingCollection`] - paging collections
//! - [`Error`] and [`Result`] - error handling
//! - [`HttpClient`], [`WebApiClient`] and [`Credential`] - the seams to a transport and a token source

mod client;
mod codec;
mod encoder;
mod error;
mod hosts;
mod method;
pub mod paging;
pub mod prelude;
mod request;
mod response;
pub mod status;

pub use client::{Credential, HttpClient, WebApiClient};
pub use codec::{
    ContentType, base64_bytes, deserialize_raw_case, from_json, from_json_list,
    from_json_unwrapped, match_raw_case, to_json,
};
pub use encoder::{
    DEFAULT_DATE_FORMAT, EncoderConfig, EncoderConfigBuilder, ParamValue, Parameters, RawString,
    TimePrecision, ToParameters,
};
pub use error::{ApiError, AuthError, Error, Result};
pub use hosts::{ACCOUNTS_HOST, API_HOST, Hosts};
pub use method::Method;
pub use paging::{CursorPage, Cursors, Page, Pagination, PagingCollection, UnixMillis};
pub use request::{PreparedRequest, PreparedRequestBuilder, Request};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

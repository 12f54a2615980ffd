//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spotkit::prelude::*;
//! ```

pub use crate::{
    AlbumType, ApiClient, Catalog, ContentType, CursorPage, Error, Expandable, Hosts, HttpClient,
    HyperClient, Method, Page, Pagination, PagingCollection, ParamValue, Parameters, RawString,
    Request, Response, Result, SearchType, Session, StatusCode, ToParameters, WebApiClient,
    from_json, to_json,
};
pub use serde::{Deserialize, Serialize};

//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spotkit_core::prelude::*;
//! ```

pub use crate::{
    ContentType, CursorPage, Error, Hosts, HttpClient, Method, Page, Pagination, PagingCollection,
    ParamValue, Parameters, Request, Response, Result, ToParameters, WebApiClient, from_json,
    from_json_list, to_json,
};

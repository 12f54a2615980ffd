//! Derive macros for spotkit.
//!
//! - `#[derive(Parameters)]` - Turn a struct into query parameters
//! - `#[derive(RawString)]` - Back a fieldless enum with fixed strings
//!
//! The generated code refers to items through `::spotkit`, so these macros
//! are meant to be used through the `spotkit` crate.

mod parameters_derive;
mod raw_string_derive;
mod rename;

use proc_macro::TokenStream;

/// Derive the `ToParameters` trait for a struct.
///
/// # Struct Attributes
///
/// - `#[param(rename_all = "camelCase")]` - Rename all fields using a case convention
///
/// Supported case conventions:
/// - `lowercase`, `UPPERCASE`
/// - `camelCase`, `PascalCase`
/// - `snake_case`, `SCREAMING_SNAKE_CASE`
/// - `kebab-case`, `SCREAMING-KEBAB-CASE`
///
/// # Field Attributes
///
/// - `#[param(rename = "name")]` - Use a different key (overrides `rename_all`)
/// - `#[param(skip)]` - Leave the field out
/// - `#[param(precision = "seconds")]` - Encode a `Duration` in seconds instead of milliseconds
///
/// `Option` fields are only added when `Some`, and `Vec` fields only when
/// non-empty. Every other field value must convert into `ParamValue`.
///
/// # Example
///
/// ```ignore
/// use spotkit::Parameters;
///
/// #[derive(Parameters)]
/// struct ArtistAlbumsQuery {
///     include_groups: Vec<AlbumType>,  // "include_groups=album,single"
///     market: Option<String>,
///     #[param(rename = "limit")]
///     page_size: u32,
/// }
/// ```
#[proc_macro_derive(Parameters, attributes(param))]
pub fn derive_parameters(input: TokenStream) -> TokenStream {
    parameters_derive::expand_parameters_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive the `RawString` trait for a fieldless enum.
///
/// Also generates `Display`, `serde::Serialize`, a case-tolerant
/// `serde::Deserialize` and `From<Self> for ParamValue`. The enum must
/// be `Copy`.
///
/// # Attributes
///
/// - `#[raw(rename_all = "snake_case")]` on the enum
/// - `#[raw(rename = "value")]` on a variant
///
/// Without either, the raw value is the variant name.
///
/// # Example
///
/// ```ignore
/// use spotkit::RawString;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, RawString)]
/// #[raw(rename_all = "snake_case")]
/// enum AlbumType {
///     Album,
///     Single,
///     AppearsOn,   // "appears_on"
///     Compilation,
/// }
/// ```
#[proc_macro_derive(RawString, attributes(raw))]
pub fn derive_raw_string(input: TokenStream) -> TokenStream {
    raw_string_derive::expand_raw_string_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

//! JSON encoding and decoding.
//!
//! Decoding goes through `serde_path_to_error` so failures carry the coding
//! path. Collections tolerate the two shapes the web API uses for them: a
//! bare value, or the same value wrapped in a single-key object
//! (`{"albums": [...]}`, `{"tracks": {...page...}}`).

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::{Error, RawString, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// JPEG image content type (`image/jpeg`).
    Jpeg,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes with object keys in sorted order.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use spotkit_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Playlist { public: bool, name: String }
///
/// let playlist = Playlist { public: false, name: "Road trip".to_string() };
/// let bytes = to_json(&playlist).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Road trip","public":false}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "album.artists[0].id").
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize a value that may be wrapped in a single-key object.
///
/// The bytes are first decoded as `T` directly. If that fails at the top
/// level and the payload is an object with exactly one key, the value under
/// that key is decoded instead. An object with no key at all is an
/// [`Error::EmptyPayload`].
///
/// # Errors
///
/// Returns the direct decoding error when the payload is neither shape, or
/// the error from decoding the wrapped value (its path starts with the key).
pub fn from_json_unwrapped<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let decoded: std::result::Result<T, _> = serde_path_to_error::deserialize(&mut deserializer);
    let direct = match decoded {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let at_top_level = direct.path().iter().next().is_none();
    let keys = serde_json::from_slice::<BTreeMap<String, IgnoredAny>>(bytes).ok();

    match keys.map(|keys| keys.len()) {
        Some(0) if at_top_level => Err(Error::EmptyPayload {
            path: direct.path().to_string(),
        }),
        Some(1) if at_top_level => from_json::<BTreeMap<String, T>>(bytes)?
            .into_values()
            .next()
            .ok_or_else(|| Error::EmptyPayload {
                path: direct.path().to_string(),
            }),
        _ => Err(Error::json_deserialization(
            direct.path().to_string(),
            direct.inner().to_string(),
        )),
    }
}

/// Deserialize a list given either as a bare array or as a single-key object
/// wrapping the array.
///
/// # Errors
///
/// See [`from_json_unwrapped`].
///
/// # Example
///
/// ```
/// use spotkit_core::from_json_list;
///
/// let bare: Vec<u32> = from_json_list(b"[1,2,3]").expect("bare");
/// let wrapped: Vec<u32> = from_json_list(br#"{"items":[1,2,3]}"#).expect("wrapped");
/// assert_eq!(bare, wrapped);
/// assert!(from_json_list::<u32>(b"{}").is_err());
/// ```
pub fn from_json_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    from_json_unwrapped(bytes)
}

/// Find the case of a string-backed enum matching `raw`.
///
/// The web API is inconsistent about casing, so after an exact match this
/// tries the lowercase, uppercase and capitalized forms of `raw`.
#[must_use]
pub fn match_raw_case<T: RawString>(raw: &str) -> Option<T> {
    T::from_raw(raw)
        .or_else(|| T::from_raw(&raw.to_lowercase()))
        .or_else(|| T::from_raw(&raw.to_uppercase()))
        .or_else(|| T::from_raw(&capitalize(raw)))
}

/// Deserialize a string-backed enum with [`match_raw_case`].
///
/// # Errors
///
/// Fails when the value is not a string or matches no case.
pub fn deserialize_raw_case<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: RawString,
{
    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
    match_raw_case(&raw).ok_or_else(|| {
        let expected = T::CASES
            .iter()
            .map(|case| format!("`{}`", case.raw_value()))
            .collect::<Vec<_>>()
            .join(", ");
        serde::de::Error::custom(format!(
            "unknown variant `{raw}`, expected one of {expected}"
        ))
    })
}

/// Uppercase the first letter of each word and lowercase the rest.
fn capitalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

/// Serde adapter encoding binary payloads as standard base64 strings.
///
/// ```
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Cover {
///     #[serde(with = "spotkit_core::base64_bytes")]
///     jpeg: Vec<u8>,
/// }
/// ```
pub mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as a base64 string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// Deserialize bytes from a base64 string.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string or not valid base64.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    struct Track {
        id: String,
        name: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum AlbumGroup {
        Album,
        AppearsOn,
    }

    impl RawString for AlbumGroup {
        const CASES: &'static [Self] = &[Self::Album, Self::AppearsOn];

        fn raw_value(&self) -> &'static str {
            match self {
                Self::Album => "album",
                Self::AppearsOn => "appears_on",
            }
        }
    }

    const TRACKS: &[u8] = br#"[{"id":"1","name":"One"},{"id":"2","name":"Two"}]"#;

    #[test]
    fn content_type_as_str() {
        check!(ContentType::Json.as_str() == "application/json");
        check!(ContentType::Jpeg.to_string() == "image/jpeg");
    }

    #[test]
    fn to_json_sorts_keys() {
        #[derive(Serialize)]
        struct Body {
            uris: Vec<String>,
            position: u32,
        }

        let body = Body {
            uris: vec!["spotify:track:1".to_string()],
            position: 0,
        };
        let bytes = to_json(&body).expect("serialize");
        check!(bytes.as_ref() == br#"{"position":0,"uris":["spotify:track:1"]}"#);
    }

    #[test]
    fn from_json_reports_path() {
        let bytes = br#"[{"id":"1","name":"One"},{"id":"2"}]"#;
        let_assert!(Err(Error::JsonDeserialization { path, message }) = from_json::<Vec<Track>>(bytes));
        check!(path == "[1]");
        check!(message.contains("name"));
    }

    #[test]
    fn list_bare_and_wrapped_agree() {
        let bare: Vec<Track> = from_json_list(TRACKS).expect("bare");

        let mut wrapped = b"{\"tracks\":".to_vec();
        wrapped.extend_from_slice(TRACKS);
        wrapped.push(b'}');
        let wrapped: Vec<Track> = from_json_list(&wrapped).expect("wrapped");

        check!(bare.len() == 2);
        check!(bare == wrapped);
    }

    #[test]
    fn list_empty_object_is_an_error() {
        let_assert!(Err(Error::EmptyPayload { .. }) = from_json_list::<Track>(b"{}"));
    }

    #[test]
    fn list_wrapped_error_keeps_key_in_path() {
        let bytes = br#"{"tracks":[{"id":"1"}]}"#;
        let_assert!(Err(err) = from_json_list::<Track>(bytes));
        check!(err.decode_path() == Some("tracks[0]"));
    }

    #[test]
    fn list_multi_key_object_is_not_unwrapped() {
        let bytes = br#"{"tracks":[],"albums":[]}"#;
        let_assert!(Err(Error::JsonDeserialization { path, .. }) = from_json_list::<Track>(bytes));
        check!(path == ".");
    }

    #[test]
    fn unwrapped_object() {
        let bytes = br#"{"track":{"id":"7","name":"Seven"}}"#;
        let track: Track = from_json_unwrapped(bytes).expect("wrapped object");
        check!(track.name == "Seven");

        let direct: Track = from_json_unwrapped(br#"{"id":"7","name":"Seven"}"#).expect("direct");
        check!(direct == track);
    }

    #[test]
    fn nested_errors_are_not_unwrapped() {
        // Failure below the top level is reported as is.
        let bytes = br#"{"id":1,"name":"One"}"#;
        let_assert!(Err(Error::JsonDeserialization { path, .. }) = from_json_unwrapped::<Track>(bytes));
        check!(path == "id");
    }

    #[test]
    fn raw_case_tolerance() {
        for raw in ["album", "ALBUM", "Album"] {
            check!(match_raw_case::<AlbumGroup>(raw) == Some(AlbumGroup::Album));
        }
        check!(match_raw_case::<AlbumGroup>("APPEARS_ON") == Some(AlbumGroup::AppearsOn));
        check!(match_raw_case::<AlbumGroup>("single").is_none());
    }

    #[test]
    fn capitalize_words() {
        check!(capitalize("top tracks") == "Top Tracks");
        check!(capitalize("ALBUM") == "Album");
    }

    #[test]
    fn raw_case_deserializer() {
        #[derive(Debug, Deserialize)]
        struct Item {
            #[serde(deserialize_with = "deserialize_raw_case")]
            group: AlbumGroup,
        }

        let item: Item = from_json(br#"{"group":"Appears_On"}"#).expect("decode");
        check!(item.group == AlbumGroup::AppearsOn);

        let_assert!(Err(err) = from_json::<Item>(br#"{"group":"compilation"}"#));
        check!(err.to_string().contains("`album`, `appears_on`"));
    }

    #[test]
    fn base64_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Cover {
            #[serde(with = "base64_bytes")]
            jpeg: Vec<u8>,
        }

        let cover = Cover {
            jpeg: vec![0xFF, 0xD8, 0xFF],
        };
        let bytes = to_json(&cover).expect("serialize");
        check!(bytes.as_ref() == br#"{"jpeg":"/9j/"}"#);
        check!(from_json::<Cover>(&bytes).expect("deserialize") == cover);
    }
}

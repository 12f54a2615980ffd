//! A minimal object model.
//!
//! Only the objects the [`Catalog`](crate::Catalog) returns, and only their
//! common fields. The web API often returns a *simplified* form of an
//! object (an album inside a track, the tracks of an album, ...). Each
//! type here covers both forms: fields that only the full form carries are
//! `Option`s, and [`Expandable`] tells the forms apart and fetches the full
//! one.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{CursorPage, Method, Page, Parameters, RawString, Result, UnixMillis, WebApiClient};

// ============================================================================
// Simplified / Full Duality
// ============================================================================

/// An object that may have been returned in its simplified form.
pub trait Expandable: DeserializeOwned + Send + Sized {
    /// Web API endpoint of the full object.
    fn href(&self) -> &Url;

    /// Returns `true` if full-only fields are missing.
    ///
    /// Full albums, artists and tracks always report a popularity; their
    /// simplified forms never do.
    fn is_simplified(&self) -> bool;

    /// The full object: `self` when already full, otherwise fetched from
    /// [`href`](Expandable::href).
    ///
    /// # Errors
    ///
    /// Returns the request error when a fetch is needed and fails.
    fn expand<C: WebApiClient>(self, client: &C) -> impl Future<Output = Result<Self>> + Send {
        async move {
            if !self.is_simplified() {
                return Ok(self);
            }
            let request = client.request(Method::Get, self.href().as_str(), Parameters::new())?;
            request.perform_json(client).await
        }
    }
}

// ============================================================================
// Album
// ============================================================================

/// The kind of release an album is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, RawString)]
#[raw(rename_all = "snake_case")]
pub enum AlbumType {
    /// A full-length release.
    Album,
    /// A single or EP.
    Single,
    /// An album of another artist featuring this one.
    AppearsOn,
    /// A compilation.
    Compilation,
}

/// An album, simplified or full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Spotify ID.
    pub id: String,
    /// Name; may be empty after a takedown.
    pub name: String,
    /// Web API endpoint of the full album.
    pub href: Url,
    /// Spotify URI.
    pub uri: String,
    /// Kind of release.
    pub album_type: AlbumType,
    /// Credited artists (simplified).
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Cover art, widest first.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Release date as reported: `1981`, `1981-12` or `1981-12-15`.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genres (full only).
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// Record label (full only).
    #[serde(default)]
    pub label: Option<String>,
    /// Popularity from 0 to 100 (full only).
    #[serde(default)]
    pub popularity: Option<u32>,
    /// First page of tracks (full only).
    #[serde(default)]
    pub tracks: Option<Page<Track>>,
}

impl Expandable for Album {
    fn href(&self) -> &Url {
        &self.href
    }

    fn is_simplified(&self) -> bool {
        self.popularity.is_none()
    }
}

// ============================================================================
// Artist
// ============================================================================

/// An artist, simplified or full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Spotify ID.
    pub id: String,
    /// Name.
    pub name: String,
    /// Web API endpoint of the full artist.
    pub href: Url,
    /// Spotify URI.
    pub uri: String,
    /// Genres (full only).
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// Portraits, widest first (full only).
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    /// Popularity from 0 to 100 (full only).
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Expandable for Artist {
    fn href(&self) -> &Url {
        &self.href
    }

    fn is_simplified(&self) -> bool {
        self.popularity.is_none()
    }
}

// ============================================================================
// Track
// ============================================================================

/// A track, simplified or full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Spotify ID.
    pub id: String,
    /// Name.
    pub name: String,
    /// Web API endpoint of the full track.
    pub href: Url,
    /// Spotify URI.
    pub uri: String,
    /// Length in milliseconds.
    pub duration_ms: u64,
    /// Position on its disc.
    #[serde(default)]
    pub track_number: u32,
    /// Disc number, usually 1.
    #[serde(default)]
    pub disc_number: u32,
    /// Whether the lyrics are explicit.
    #[serde(default)]
    pub explicit: bool,
    /// Credited artists (simplified).
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// The album it appears on, simplified (full only).
    #[serde(default)]
    pub album: Option<Box<Album>>,
    /// Popularity from 0 to 100 (full only).
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Track {
    /// Length of the track.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Expandable for Track {
    fn href(&self) -> &Url {
        &self.href
    }

    fn is_simplified(&self) -> bool {
        self.popularity.is_none()
    }
}

// ============================================================================
// Others
// ============================================================================

/// An image in one of several sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Source URL.
    pub url: Url,
    /// Width in pixels, when known.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels, when known.
    #[serde(default)]
    pub height: Option<u32>,
}

/// A track the current user played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayHistory {
    /// The track (full).
    pub track: Track,
    /// When playback started.
    pub played_at: DateTime<Utc>,
}

/// Recently played tracks, most recent first.
pub type RecentlyPlayed = CursorPage<PlayHistory, UnixMillis>;

/// A playlist, simplified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Spotify ID.
    pub id: String,
    /// Name.
    pub name: String,
    /// Web API endpoint of the full playlist.
    pub href: Url,
    /// Spotify URI.
    pub uri: String,
    /// Description, possibly with HTML markup.
    #[serde(default)]
    pub description: Option<String>,
    /// Cover images, widest first.
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Featured playlists with their localized message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPlaylists {
    /// Tagline, e.g. "Monday morning music, coming right up!".
    #[serde(default)]
    pub message: Option<String>,
    /// The playlists.
    pub playlists: Page<Playlist>,
}

/// Results of a search, one page per requested type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching albums.
    #[serde(default)]
    pub albums: Option<Page<Album>>,
    /// Matching artists.
    #[serde(default)]
    pub artists: Option<Page<Artist>>,
    /// Matching playlists.
    #[serde(default)]
    pub playlists: Option<Page<Playlist>>,
    /// Matching tracks.
    #[serde(default)]
    pub tracks: Option<Page<Track>>,
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::{ParamValue, from_json};

    const SIMPLIFIED_ALBUM: &str = r#"{
        "album_type": "ALBUM",
        "id": "6akEvsycLGftJxYudPjmqK",
        "name": "Dancing in the Dark",
        "href": "https://api.spotify.com/v1/albums/6akEvsycLGftJxYudPjmqK",
        "uri": "spotify:album:6akEvsycLGftJxYudPjmqK",
        "images": [{"url": "https://i.scdn.co/image/ab67", "width": 640, "height": 640}]
    }"#;

    #[test]
    fn album_type_is_case_tolerant() {
        let album: Album = from_json(SIMPLIFIED_ALBUM.as_bytes()).expect("decodable");
        check!(album.album_type == AlbumType::Album);
        check!(album.is_simplified());
        check!(album.images[0].width == Some(640));
    }

    #[test]
    fn album_type_raw_values() {
        check!(AlbumType::AppearsOn.raw_value() == "appears_on");
        check!(AlbumType::AppearsOn.to_string() == "appears_on");
        check!(AlbumType::from_raw("compilation") == Some(AlbumType::Compilation));
        check!(ParamValue::from(AlbumType::Single) == ParamValue::Text("single".to_string()));

        let_assert!(Ok(json) = serde_json::to_string(&AlbumType::AppearsOn));
        check!(json == r#""appears_on""#);
    }

    #[test]
    fn unknown_album_type_lists_cases() {
        let_assert!(Err(err) = from_json::<AlbumType>(br#""mixtape""#));
        check!(err.to_string().contains("unknown variant `mixtape`"));
        check!(err.to_string().contains("`appears_on`"));
    }

    #[test]
    fn full_track_is_not_simplified() {
        let json = r#"{
            "id": "3n3Ppam7vgaVa1iaRUc9Lp",
            "name": "Mr. Brightside",
            "href": "https://api.spotify.com/v1/tracks/3n3Ppam7vgaVa1iaRUc9Lp",
            "uri": "spotify:track:3n3Ppam7vgaVa1iaRUc9Lp",
            "duration_ms": 222075,
            "track_number": 2,
            "popularity": 81,
            "album": {
                "album_type": "album",
                "id": "4OHNH3sDzIxnmUADXzv2kT",
                "name": "Hot Fuss",
                "href": "https://api.spotify.com/v1/albums/4OHNH3sDzIxnmUADXzv2kT",
                "uri": "spotify:album:4OHNH3sDzIxnmUADXzv2kT"
            }
        }"#;

        let track: Track = from_json(json.as_bytes()).expect("decodable");
        check!(!track.is_simplified());
        check!(track.duration() == Duration::from_millis(222_075));
        let_assert!(Some(album) = &track.album);
        check!(album.is_simplified());
    }

    #[test]
    fn play_history_decodes_instant() {
        let json = r#"{
            "track": {
                "id": "2gNfxysfBRfl9Lvi9T3v6R",
                "name": "Tiny Cities",
                "href": "https://api.spotify.com/v1/tracks/2gNfxysfBRfl9Lvi9T3v6R",
                "uri": "spotify:track:2gNfxysfBRfl9Lvi9T3v6R",
                "duration_ms": 239000
            },
            "played_at": "2016-12-13T20:44:04.589Z"
        }"#;

        let history: PlayHistory = from_json(json.as_bytes()).expect("decodable");
        check!(history.played_at.timestamp_millis() == 1_481_661_844_589);
    }
}

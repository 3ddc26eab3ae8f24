//! Request payload validation
//!
//! Each operation has a raw payload type mirroring the JSON a client sends
//! and a parsed output type the rest of the system works with. Parsing fails
//! with [`MusicError::InvalidPayload`], never with a domain-rule error, so a
//! caller can always tell malformed input apart from a rejected operation.

use crate::error::{MusicError, Result};
use crate::types::{
    AlbumId, CreateAlbum, CreateCollaboration, CreateSong, CreateUser, Credentials, PlaylistId,
    SongId, UserId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A raw payload that can be checked into its parsed form
pub trait Validate: DeserializeOwned {
    type Output;

    /// Check field-level rules on an already-deserialized payload
    fn check(self) -> Result<Self::Output>;
}

/// Deserialize `payload` as `P` and check it
pub fn validate<P: Validate>(payload: serde_json::Value) -> Result<P::Output> {
    let raw: P = serde_json::from_value(payload)?;
    raw.check()
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(MusicError::invalid_payload(format!(
            "\"{field}\" is not allowed to be empty"
        ))),
        None => Err(MusicError::invalid_payload(format!("\"{field}\" is required"))),
    }
}

fn required_int(field: &str, value: Option<i64>) -> Result<i32> {
    optional_int(field, value)?
        .ok_or_else(|| MusicError::invalid_payload(format!("\"{field}\" is required")))
}

fn optional_int(field: &str, value: Option<i64>) -> Result<Option<i32>> {
    value
        .map(|v| {
            i32::try_from(v).map_err(|_| {
                MusicError::invalid_payload(format!("\"{field}\" is out of range"))
            })
        })
        .transpose()
}

/// `POST /playlists`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistPayload {
    name: Option<String>,
}

impl Validate for PlaylistPayload {
    type Output = String;

    fn check(self) -> Result<String> {
        required("name", self.name)
    }
}

/// `POST/DELETE /playlists/:id/songs`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PlaylistSongPayload {
    song_id: Option<String>,
}

impl Validate for PlaylistSongPayload {
    type Output = SongId;

    fn check(self) -> Result<SongId> {
        required("songId", self.song_id).map(SongId::new)
    }
}

/// `POST/DELETE /collaborations`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CollaborationPayload {
    playlist_id: Option<String>,
    user_id: Option<String>,
}

impl Validate for CollaborationPayload {
    type Output = CreateCollaboration;

    fn check(self) -> Result<CreateCollaboration> {
        Ok(CreateCollaboration {
            playlist_id: PlaylistId::new(required("playlistId", self.playlist_id)?),
            user_id: UserId::new(required("userId", self.user_id)?),
        })
    }
}

/// `POST /users`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPayload {
    username: Option<String>,
    password: Option<String>,
    fullname: Option<String>,
}

impl Validate for UserPayload {
    type Output = CreateUser;

    fn check(self) -> Result<CreateUser> {
        Ok(CreateUser {
            username: required("username", self.username)?,
            password: required("password", self.password)?,
            fullname: required("fullname", self.fullname)?,
        })
    }
}

/// `POST /authentications`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginPayload {
    username: Option<String>,
    password: Option<String>,
}

impl Validate for LoginPayload {
    type Output = Credentials;

    fn check(self) -> Result<Credentials> {
        Ok(Credentials {
            username: required("username", self.username)?,
            password: required("password", self.password)?,
        })
    }
}

/// `PUT/DELETE /authentications`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RefreshTokenPayload {
    refresh_token: Option<String>,
}

impl Validate for RefreshTokenPayload {
    type Output = String;

    fn check(self) -> Result<String> {
        required("refreshToken", self.refresh_token)
    }
}

/// `POST/PUT /albums`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlbumPayload {
    name: Option<String>,
    year: Option<i64>,
}

impl Validate for AlbumPayload {
    type Output = CreateAlbum;

    fn check(self) -> Result<CreateAlbum> {
        Ok(CreateAlbum {
            name: required("name", self.name)?,
            year: required_int("year", self.year)?,
        })
    }
}

/// `POST/PUT /songs`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SongPayload {
    title: Option<String>,
    year: Option<i64>,
    genre: Option<String>,
    performer: Option<String>,
    duration: Option<i64>,
    album_id: Option<String>,
}

impl Validate for SongPayload {
    type Output = CreateSong;

    fn check(self) -> Result<CreateSong> {
        Ok(CreateSong {
            title: required("title", self.title)?,
            year: required_int("year", self.year)?,
            genre: required("genre", self.genre)?,
            performer: required("performer", self.performer)?,
            duration: optional_int("duration", self.duration)?,
            album_id: self.album_id.map(AlbumId::new),
        })
    }
}

/// `POST /export/playlists/:id`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ExportPayload {
    target_email: Option<String>,
}

impl Validate for ExportPayload {
    type Output = String;

    fn check(self) -> Result<String> {
        let email = required("targetEmail", self.target_email)?;
        if !looks_like_email(&email) {
            return Err(MusicError::invalid_payload(
                "\"targetEmail\" must be a valid email",
            ));
        }
        Ok(email)
    }
}

// local@domain.tld, no whitespace, no empty domain labels
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();

    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn playlist_payload_requires_name() {
        assert_eq!(
            validate::<PlaylistPayload>(json!({ "name": "Road trip" })).unwrap(),
            "Road trip"
        );

        let err = validate::<PlaylistPayload>(json!({})).unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(msg) if msg.contains("name")));
    }

    #[test]
    fn empty_string_is_rejected() {
        let err = validate::<PlaylistSongPayload>(json!({ "songId": "" })).unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(_)));
    }

    #[test]
    fn wrong_type_is_invalid_payload_not_invariant() {
        let err = validate::<PlaylistSongPayload>(json!({ "songId": 42 })).unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(_)));
        assert!(!err.is_invariant());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err =
            validate::<PlaylistPayload>(json!({ "name": "x", "owner": "user-1" })).unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(_)));
    }

    #[test]
    fn collaboration_payload_parses_ids() {
        let parsed = validate::<CollaborationPayload>(json!({
            "playlistId": "playlist-1",
            "userId": "user-2",
        }))
        .unwrap();

        assert_eq!(parsed.playlist_id, PlaylistId::new("playlist-1"));
        assert_eq!(parsed.user_id, UserId::new("user-2"));
    }

    #[test]
    fn song_payload_allows_null_optionals() {
        let song = validate::<SongPayload>(json!({
            "title": "Lagu",
            "year": 2021,
            "genre": "Pop",
            "performer": "Band",
            "duration": null,
            "albumId": null,
        }))
        .unwrap();

        assert_eq!(song.year, 2021);
        assert_eq!(song.duration, None);
        assert_eq!(song.album_id, None);
    }

    #[test]
    fn song_payload_rejects_fractional_year() {
        let err = validate::<SongPayload>(json!({
            "title": "Lagu",
            "year": 2021.5,
            "genre": "Pop",
            "performer": "Band",
        }))
        .unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(_)));
    }

    #[test]
    fn album_payload_requires_year() {
        let err = validate::<AlbumPayload>(json!({ "name": "Viva" })).unwrap_err();
        assert!(matches!(err, MusicError::InvalidPayload(msg) if msg.contains("year")));
    }

    #[test]
    fn export_payload_needs_a_plausible_email() {
        assert_eq!(
            validate::<ExportPayload>(json!({ "targetEmail": "fan@example.com" })).unwrap(),
            "fan@example.com"
        );

        for bad in ["fan", "fan@", "@example.com", "fan@example", "fan@exa mple.com", "a@b@c.com"] {
            let err = validate::<ExportPayload>(json!({ "targetEmail": bad })).unwrap_err();
            assert!(matches!(err, MusicError::InvalidPayload(_)), "{bad} accepted");
        }
    }
}

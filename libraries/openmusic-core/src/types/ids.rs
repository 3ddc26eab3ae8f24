/// ID types for OpenMusic entities
///
/// Every entity id is an opaque string of the form `<prefix>-<16 chars>`.
/// Ids coming from clients are wrapped as-is; only freshly generated ids
/// are guaranteed to carry the prefix.
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx-support", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by `generate`
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random id
            pub fn generate() -> Self {
                Self(format!("{}-{}", Self::PREFIX, random_suffix()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

fn random_suffix() -> String {
    let mut simple = Uuid::new_v4().simple().to_string();
    simple.truncate(16);
    simple
}

string_id!(
    /// User identifier
    UserId,
    "user"
);
string_id!(
    /// Song identifier
    SongId,
    "song"
);
string_id!(
    /// Album identifier
    AlbumId,
    "album"
);
string_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);
string_id!(
    /// Collaboration (shared access grant) identifier
    CollaborationId,
    "collab"
);
string_id!(
    /// Playlist membership identifier
    MembershipId,
    "ps"
);
string_id!(
    /// Activity event identifier
    ActivityId,
    "act"
);
string_id!(
    /// Album like identifier
    LikeId,
    "like"
);

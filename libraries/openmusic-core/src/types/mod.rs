mod activity;
mod album;
mod collaboration;
mod export;
mod ids;
mod playlist;
mod song;
mod user;

pub use activity::{ActivityAction, ActivityEntry, ActivityEvent};
pub use album::{Album, AlbumWithSongs, CreateAlbum};
pub use collaboration::{Collaboration, CreateCollaboration};
pub use export::ExportRequest;
pub use ids::{
    ActivityId, AlbumId, CollaborationId, LikeId, MembershipId, PlaylistId, SongId, UserId,
};
pub use playlist::{CreatePlaylist, PlaylistAccess, PlaylistSummary, PlaylistWithSongs};
pub use song::{CreateSong, Song, SongQuery, SongSummary};
pub use user::{CreateUser, Credentials, User};

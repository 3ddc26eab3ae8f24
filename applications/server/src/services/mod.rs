/// Server services
pub mod accounts;
pub mod auth;
pub mod likes;

pub use auth::AuthService;
pub use likes::AlbumLikes;

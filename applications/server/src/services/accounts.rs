/// User registration and credential checks
use crate::{error::Result, services::AuthService};
use openmusic_core::{CreateUser, Credentials, MusicError, UserId};
use openmusic_storage::SqliteStorage;

/// Register a user, hashing the password first
///
/// # Errors
///
/// `MusicError::Invariant` if the username is taken
pub async fn register(
    storage: &SqliteStorage,
    auth: &AuthService,
    user: CreateUser,
) -> Result<UserId> {
    if storage.get_credentials(&user.username).await?.is_some() {
        return Err(MusicError::invariant("username is already taken").into());
    }

    let password_hash = auth.hash_password(&user.password)?;
    let id = storage
        .create_user(&user.username, &password_hash, &user.fullname)
        .await?;
    tracing::info!(user_id = %id, username = %user.username, "user registered");

    Ok(id)
}

/// Check a username/password pair and return the user's id
///
/// # Errors
///
/// `MusicError::Authentication` for an unknown username or a wrong password;
/// the two cases are indistinguishable to the caller.
pub async fn verify_credential(
    storage: &SqliteStorage,
    auth: &AuthService,
    credentials: &Credentials,
) -> Result<UserId> {
    let rejected = || MusicError::authentication("the credentials you provided are wrong");

    let Some((user_id, hash)) = storage.get_credentials(&credentials.username).await? else {
        return Err(rejected().into());
    };

    if !auth.verify_password(&credentials.password, &hash)? {
        tracing::debug!(username = %credentials.username, "password mismatch");
        return Err(rejected().into());
    }

    Ok(user_id)
}

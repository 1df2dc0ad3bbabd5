use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    spotify::client::SpotifyClient,
    types::{Credential, CurrentUserResponse, UserIdentity},
};

/// Fetches the account behind the credential (`GET /me`).
#[instrument(skip_all)]
pub async fn current_user(
    client: &SpotifyClient,
    credential: &Credential,
) -> Result<UserIdentity, ApiError> {
    let me: CurrentUserResponse = client.get_json("me", &[], credential).await?;
    debug!(user = %me.id, display_name = ?me.display_name, "resolved current user");

    Ok(UserIdentity { id: me.id })
}

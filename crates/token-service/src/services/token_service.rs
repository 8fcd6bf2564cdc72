use crate::crypto::GrantSigner;
use crate::errors::{TokenError, VALIDATION_MESSAGE};
use crate::models::AccessGrant;
use common::grant::{RoomPermissions, VideoGrant};

/// Issue a room access token for a participant.
///
/// Both names must be present and non-empty. Validation happens before the
/// signer is consulted, so a rejected request never produces a token.
/// Every caller receives the full permission set.
pub fn issue_token(
    signer: &dyn GrantSigner,
    room_name: Option<&str>,
    participant_name: Option<&str>,
) -> Result<String, TokenError> {
    let (room_name, participant_name) = match (room_name, participant_name) {
        (Some(room), Some(participant)) if !room.is_empty() && !participant.is_empty() => {
            (room, participant)
        }
        _ => return Err(TokenError::Validation(VALIDATION_MESSAGE.to_string())),
    };

    let grant = build_grant(room_name, participant_name, &RoomPermissions::full());
    signer.sign(&grant)
}

/// Build the unsigned grant. The participant name doubles as the identity.
pub fn build_grant(
    room_name: &str,
    participant_name: &str,
    permissions: &RoomPermissions,
) -> AccessGrant {
    AccessGrant {
        identity: participant_name.to_string(),
        name: participant_name.to_string(),
        video: VideoGrant::for_room(room_name, permissions),
    }
}

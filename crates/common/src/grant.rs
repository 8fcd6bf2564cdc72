//! Room access grant claims.
//!
//! A grant is an HS256-signed JWT that authorizes one participant to join a
//! single media room. The token service signs it with the shared API secret;
//! the downstream media server verifies the signature with the same secret
//! and reads the `video` claim to decide what the participant may do.
//!
//! # Example payload
//!
//! ```json
//! {
//!   "iss": "devkey",
//!   "sub": "alice",
//!   "name": "alice",
//!   "iat": 1707000000,
//!   "nbf": 1707000000,
//!   "exp": 1707021600,
//!   "jti": "alice",
//!   "video": {
//!     "roomJoin": true,
//!     "room": "lobby",
//!     "canPublish": true,
//!     "canSubscribe": true,
//!     "canPublishData": true
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single capability a participant can hold inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomPermission {
    /// Connect to the room at all.
    Join,
    /// Publish audio/video tracks.
    Publish,
    /// Subscribe to other participants' tracks.
    Subscribe,
    /// Send data-channel messages.
    PublishData,
}

impl RoomPermission {
    /// Every permission, in claim order.
    pub const ALL: [RoomPermission; 4] = [
        RoomPermission::Join,
        RoomPermission::Publish,
        RoomPermission::Subscribe,
        RoomPermission::PublishData,
    ];
}

/// An explicit set of [`RoomPermission`]s passed into grant construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPermissions {
    granted: Vec<RoomPermission>,
}

impl RoomPermissions {
    /// The full participant permission set: join, publish, subscribe and
    /// publish data.
    #[must_use]
    pub fn full() -> Self {
        Self::from_permissions(&RoomPermission::ALL)
    }

    /// Build a set from an arbitrary list. Duplicates are collapsed.
    #[must_use]
    pub fn from_permissions(permissions: &[RoomPermission]) -> Self {
        let mut granted = permissions.to_vec();
        granted.sort_unstable();
        granted.dedup();
        Self { granted }
    }

    #[must_use]
    pub fn contains(&self, permission: RoomPermission) -> bool {
        self.granted.contains(&permission)
    }
}

/// The `video` claim carried by a grant.
///
/// Field names are camelCase on the wire because the media server reads them
/// that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    pub room_join: bool,
    pub room: String,
    pub can_publish: bool,
    pub can_subscribe: bool,
    pub can_publish_data: bool,
}

impl VideoGrant {
    /// Map a permission set onto the boolean claim flags for `room`.
    #[must_use]
    pub fn for_room(room: &str, permissions: &RoomPermissions) -> Self {
        Self {
            room_join: permissions.contains(RoomPermission::Join),
            room: room.to_string(),
            can_publish: permissions.contains(RoomPermission::Publish),
            can_subscribe: permissions.contains(RoomPermission::Subscribe),
            can_publish_data: permissions.contains(RoomPermission::PublishData),
        }
    }
}

/// Full JWT payload of a room access grant.
///
/// `sub`, `name` and `jti` all carry the participant identity, so `Debug`
/// redacts them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantClaims {
    /// API key that signed the grant.
    pub iss: String,
    /// Participant identity.
    pub sub: String,
    /// Participant display name (identical to `sub`).
    pub name: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    pub video: VideoGrant,
}

impl fmt::Debug for GrantClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantClaims")
            .field("iss", &self.iss)
            .field("sub", &"[REDACTED]")
            .field("name", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("nbf", &self.nbf)
            .field("exp", &self.exp)
            .field("jti", &"[REDACTED]")
            .field("video", &self.video)
            .finish()
    }
}

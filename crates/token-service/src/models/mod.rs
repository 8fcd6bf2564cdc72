use common::grant::VideoGrant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token request body (`POST /token`).
///
/// Both fields are optional here so a missing field is reported by request
/// validation instead of by the JSON extractor.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub participant_name: Option<String>,
}

/// Only field presence is printed; names are participant data.
impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("room_name", &self.room_name.as_ref().map(|_| "[REDACTED]"))
            .field(
                "participant_name",
                &self.participant_name.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Token response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// An unsigned grant built from a validated request.
///
/// The signer adds the issuer and time claims.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub identity: String,
    pub name: String,
    pub video: VideoGrant,
}

impl fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGrant")
            .field("identity", &"[REDACTED]")
            .field("name", &"[REDACTED]")
            .field("video", &self.video)
            .finish()
    }
}

/// Liveness response (`GET /health`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Service description (`GET /`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub name: String,
    pub version: String,
    /// Deployment environment the process was started in.
    pub environment: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

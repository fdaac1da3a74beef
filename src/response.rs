// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::join::{JoinError, JoinHandler, JoinOutcome};
use crate::policy::WritePolicy;
use crate::store::GroupStore;

/// Action identifier carried by every response.
pub const ACTION: &str = "joinGroup";

/// Permissive cross-origin headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

/// Inbound join payload.
///
/// The surrounding envelope may carry arbitrary other fields, only `groupId` and `userId` are
/// read.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl JoinRequest {
    pub fn new(group_id: &str, user_id: &str) -> Self {
        Self {
            group_id: Some(group_id.to_owned()),
            user_id: Some(user_id.to_owned()),
        }
    }
}

/// Body of a join response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    pub action: String,
}

/// Outbound join response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl JoinResponse {
    fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: ResponseBody {
                message: message.to_owned(),
                action: ACTION.to_owned(),
            },
        }
    }

    /// Maps a join result onto the response envelope.
    ///
    /// Every failure is caught here, nothing propagates to the transport. The storage arm is the
    /// only one hiding the underlying cause from the caller; it is logged instead.
    pub fn from_result<E>(result: Result<JoinOutcome, JoinError<E>>) -> Self
    where
        E: Display,
    {
        match result {
            Ok(JoinOutcome::Joined) => Self::new(200, "User joined the group successfully."),
            Ok(JoinOutcome::AlreadyMember) => {
                Self::new(200, "User is already a member of the group.")
            }
            Err(JoinError::NotFound) => Self::new(404, "Group not found."),
            Err(JoinError::InvalidRequest) => Self::new(404, "No user given."),
            Err(JoinError::CapacityExceeded) => {
                Self::new(400, "Group has reached its maximum number of members.")
            }
            Err(JoinError::Storage(err)) => {
                warn!("failed to join group: {err}");
                Self::new(500, "Failed to join group")
            }
        }
    }

    /// Headers attached to every response, allowing any origin.
    pub fn headers(&self) -> [(&'static str, &'static str); 3] {
        CORS_HEADERS
    }

    /// The response body as a JSON string.
    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body).expect("body is a plain string record")
    }
}

/// Handles one inbound join payload and returns the response envelope.
///
/// A payload without a `groupId` cannot match any record and answers "Group not found.".
pub async fn handle<S, P>(handler: &JoinHandler<S, P>, request: &JoinRequest) -> JoinResponse
where
    S: GroupStore,
    P: WritePolicy,
{
    let group_id = request.group_id.as_deref().unwrap_or_default();
    let result = handler.join(group_id, request.user_id.as_deref()).await;
    JoinResponse::from_result(result)
}

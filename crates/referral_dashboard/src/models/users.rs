use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The signed-in user as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub whatsapp_channel_name: String,
    /// Link assigned by the backend, if any.
    pub referral_link: Option<String>,
}

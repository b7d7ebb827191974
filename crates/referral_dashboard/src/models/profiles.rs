use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::users::AuthenticatedUser;

/// How long a save confirmation stays on screen.
pub const SUCCESS_MESSAGE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub full_name: String,
    pub email: String,
    /// WhatsApp contact number.
    pub whatsapp_number: String,
    /// Name of the WhatsApp group the user shares their link with.
    pub whatsapp_channel_name: String,
}

impl From<&AuthenticatedUser> for ProfileSettings {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            whatsapp_number: user.whatsapp_number.clone(),
            whatsapp_channel_name: user.whatsapp_channel_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub whatsapp_notifications: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            whatsapp_notifications: true,
        }
    }
}

/// Confirmation returned once a settings save completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAcknowledgement {
    pub message: String,
    pub saved_at: DateTime<Utc>,
}

impl SaveAcknowledgement {
    pub fn new(message: &str, saved_at: DateTime<Utc>) -> Self {
        Self {
            message: message.to_string(),
            saved_at,
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        match (now - self.saved_at).to_std() {
            Ok(elapsed) => elapsed < SUCCESS_MESSAGE_DURATION,
            // `now` before `saved_at` means the message was only just shown
            Err(_) => true,
        }
    }

    /// The confirmation text while it should still be shown.
    pub fn visible_message(&self, now: DateTime<Utc>) -> Option<&str> {
        self.is_visible(now).then_some(self.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn notifications_default_to_enabled() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.email_notifications);
        assert!(prefs.whatsapp_notifications);
    }

    #[test]
    fn acknowledgement_expires_after_three_seconds() {
        let saved_at = Utc::now();
        let ack = SaveAcknowledgement::new("Profile updated successfully", saved_at);

        assert!(ack.is_visible(saved_at));
        assert!(ack.is_visible(saved_at + Duration::milliseconds(2999)));
        assert!(!ack.is_visible(saved_at + Duration::seconds(3)));
    }

    #[test]
    fn message_is_hidden_once_expired() {
        let saved_at = Utc::now();
        let ack =
            SaveAcknowledgement::new("Notification preferences updated successfully", saved_at);

        assert_eq!(
            ack.visible_message(saved_at + Duration::seconds(1)),
            Some("Notification preferences updated successfully")
        );
        assert_eq!(ack.visible_message(saved_at + Duration::seconds(5)), None);
    }

    #[test]
    fn profile_deserializes_from_camel_case() {
        let profile: ProfileSettings = serde_json::from_str(
            r#"{"fullName":"Ada L.","email":"ada@example.com","whatsappNumber":"+1 555 0100","whatsappChannelName":"Deals"}"#,
        )
        .unwrap();
        assert_eq!(profile.whatsapp_channel_name, "Deals");
    }
}

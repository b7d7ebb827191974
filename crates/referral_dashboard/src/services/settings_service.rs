use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, PoisonError},
    time::Duration,
};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    models::{
        profiles::{NotificationPreferences, ProfileSettings, SaveAcknowledgement},
        users::AuthenticatedUser,
    },
    utils::errors::dashboard_error::DashboardError,
};

pub const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully";
pub const NOTIFICATIONS_SAVED_MESSAGE: &str = "Notification preferences updated successfully";

/// Profile and notification settings, kept in memory.
///
/// Saves are acknowledged after a fixed delay standing in for the backend
/// round trip. Each user has at most one save in flight; saves for
/// different users run independently.
pub struct SettingsService {
    save_delay: Duration,
    saving: Mutex<HashSet<String>>,
    profiles: RwLock<HashMap<String, ProfileSettings>>,
    notifications: RwLock<HashMap<String, NotificationPreferences>>,
}

/// Releases the user's save slot when the save finishes or its future is dropped.
struct SavingGuard<'a> {
    saving: &'a Mutex<HashSet<String>>,
    user_id: String,
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.saving
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}

impl SettingsService {
    pub fn new(save_delay: Duration) -> Self {
        Self {
            save_delay,
            saving: Mutex::new(HashSet::new()),
            profiles: RwLock::new(HashMap::new()),
            notifications: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_saving(&self, user: &AuthenticatedUser) -> bool {
        self.saving
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&user.id)
    }

    /// Stored profile for `user`, seeded from the user record until first saved.
    pub async fn get_profile(&self, user: &AuthenticatedUser) -> ProfileSettings {
        self.profiles
            .read()
            .await
            .get(&user.id)
            .cloned()
            .unwrap_or_else(|| ProfileSettings::from(user))
    }

    pub async fn get_notifications(&self, user: &AuthenticatedUser) -> NotificationPreferences {
        self.notifications
            .read()
            .await
            .get(&user.id)
            .copied()
            .unwrap_or_default()
    }

    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        profile: ProfileSettings,
    ) -> Result<SaveAcknowledgement, DashboardError> {
        let _guard = self.begin_save(user)?;
        tokio::time::sleep(self.save_delay).await;
        self.profiles.write().await.insert(user.id.clone(), profile);
        info!("Profile saved for user {}", user.id);
        Ok(SaveAcknowledgement::new(PROFILE_SAVED_MESSAGE, Utc::now()))
    }

    pub async fn update_notifications(
        &self,
        user: &AuthenticatedUser,
        preferences: NotificationPreferences,
    ) -> Result<SaveAcknowledgement, DashboardError> {
        let _guard = self.begin_save(user)?;
        tokio::time::sleep(self.save_delay).await;
        self.notifications
            .write()
            .await
            .insert(user.id.clone(), preferences);
        info!(
            "Notification preferences saved for user {}: email={}, whatsapp={}",
            user.id, preferences.email_notifications, preferences.whatsapp_notifications
        );
        Ok(SaveAcknowledgement::new(
            NOTIFICATIONS_SAVED_MESSAGE,
            Utc::now(),
        ))
    }

    fn begin_save(&self, user: &AuthenticatedUser) -> Result<SavingGuard<'_>, DashboardError> {
        let inserted = self
            .saving
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id.clone());
        if !inserted {
            return Err(DashboardError::SaveInProgress);
        }
        Ok(SavingGuard {
            saving: &self.saving,
            user_id: user.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::auth_service::test_support::demo_user;

    #[tokio::test]
    async fn profile_defaults_to_user_record() {
        let service = SettingsService::new(Duration::ZERO);
        let profile = service.get_profile(&demo_user()).await;
        assert_eq!(profile, ProfileSettings::from(&demo_user()));
    }

    #[tokio::test]
    async fn saved_profile_is_returned() {
        let service = SettingsService::new(Duration::ZERO);
        let user = demo_user();
        let profile = ProfileSettings {
            full_name: "Jane Q. Doe".to_string(),
            ..ProfileSettings::from(&user)
        };

        let ack = service.update_profile(&user, profile.clone()).await.unwrap();

        assert_eq!(ack.message, PROFILE_SAVED_MESSAGE);
        assert_eq!(service.get_profile(&user).await, profile);
        assert!(!service.is_saving(&user));
    }

    #[tokio::test]
    async fn notification_toggles_persist() {
        let service = SettingsService::new(Duration::ZERO);
        let user = demo_user();
        let prefs = NotificationPreferences {
            email_notifications: false,
            whatsapp_notifications: true,
        };

        let ack = service.update_notifications(&user, prefs).await.unwrap();

        assert_eq!(ack.message, NOTIFICATIONS_SAVED_MESSAGE);
        assert_eq!(service.get_notifications(&user).await, prefs);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_saves_are_rejected() {
        let service = Arc::new(SettingsService::new(Duration::from_millis(1000)));
        let user = demo_user();

        let first = {
            let service = service.clone();
            let user = user.clone();
            tokio::spawn(async move {
                service
                    .update_notifications(&user, NotificationPreferences::default())
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert!(service.is_saving(&user));

        let second = service
            .update_profile(&user, ProfileSettings::from(&user))
            .await;
        assert_eq!(second, Err(DashboardError::SaveInProgress));

        assert!(first.await.unwrap().is_ok());
        assert!(!service.is_saving(&user));
    }

    #[tokio::test(start_paused = true)]
    async fn saves_for_different_users_do_not_block_each_other() {
        let service = Arc::new(SettingsService::new(Duration::from_millis(1000)));
        let user = demo_user();
        let other = AuthenticatedUser {
            id: "654321".to_string(),
            ..demo_user()
        };

        let first = {
            let service = service.clone();
            let user = user.clone();
            tokio::spawn(async move {
                service
                    .update_notifications(&user, NotificationPreferences::default())
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert!(service.is_saving(&user));
        assert!(!service.is_saving(&other));

        let second = service
            .update_profile(&other, ProfileSettings::from(&other))
            .await;
        assert!(second.is_ok());

        assert!(first.await.unwrap().is_ok());
        assert!(!service.is_saving(&user));
    }
}

pub mod auth_service;
pub mod clipboard_service;
pub mod referral_service;
pub mod settings_service;

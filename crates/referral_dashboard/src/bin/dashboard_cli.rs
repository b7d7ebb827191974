use std::time::Instant;

use chrono::Utc;
use dotenv::dotenv;
use inquire::{Confirm, Select, Text};
use referral_dashboard::{
    container::ServiceContainer,
    models::{
        dashboard::DashboardSummary,
        profiles::{NotificationPreferences, ProfileSettings, SaveAcknowledgement},
        users::AuthenticatedUser,
    },
    services::{
        auth_service::{gate, AuthProvider, GateDecision},
        clipboard_service::{Clipboard, CommandClipboard, CopyAcknowledgement, UnavailableClipboard},
    },
    settings,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenv().ok();
    let settings = settings::load_settings()?;
    referral_dashboard::init_tracing(&settings);

    let container = ServiceContainer::new(&settings)?;
    let token = match settings.auth_token.clone() {
        Some(token) => token,
        None => Text::new("Session token:").prompt()?,
    };
    let auth_state = container.auth_provider.authenticate(Some(token.as_str()));
    let user = match gate(&auth_state) {
        GateDecision::Allow(user) => user,
        GateDecision::Redirect(login_path) => {
            println!("No active session. Sign in at {} first.", login_path);
            return Ok(());
        }
        GateDecision::Loading => {
            println!("Session is still loading, try again shortly.");
            return Ok(());
        }
    };

    let clipboard: Box<dyn Clipboard> = match CommandClipboard::detect() {
        Some(clipboard) => Box::new(clipboard),
        None => Box::new(UnavailableClipboard),
    };

    container.referral_service.fetch_stats().await;
    run_cli(&container, &user, clipboard.as_ref()).await
}

async fn run_cli(
    container: &ServiceContainer,
    user: &AuthenticatedUser,
    clipboard: &dyn Clipboard,
) -> CliResult<()> {
    let mut copied: Option<CopyAcknowledgement> = None;
    let mut saved: Option<SaveAcknowledgement> = None;

    loop {
        let choices = vec![
            "Show Dashboard",
            "Refresh Stats",
            "Copy Referral Link",
            "Edit Profile",
            "Notification Settings",
            "Exit",
        ];

        let choice = Select::new("Select an action:", choices).prompt()?;

        match choice {
            "Show Dashboard" => {
                let summary = container
                    .referral_service
                    .dashboard_summary(user, container.currency, Utc::now())
                    .await;
                let copied_now = copied.is_some_and(|ack| ack.is_active(Instant::now()));
                print_dashboard(&summary, copied_now);
                let saved_message = saved
                    .as_ref()
                    .and_then(|ack| ack.visible_message(Utc::now()));
                if let Some(message) = saved_message {
                    println!("{}\n", message);
                }
            }
            "Refresh Stats" => {
                let outcome = container.referral_service.fetch_stats().await;
                println!("Refresh: {:?}", outcome);
            }
            "Copy Referral Link" => {
                copied = container.referral_service.copy_link(user, clipboard).await;
                match copied {
                    Some(_) => println!("Copied!"),
                    None => println!(
                        "Clipboard unavailable. Your link: {}",
                        container.referral_service.link_for(user)
                    ),
                }
            }
            "Edit Profile" => saved = Some(edit_profile(container, user).await?),
            "Notification Settings" => saved = Some(edit_notifications(container, user).await?),
            "Exit" => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn print_dashboard(summary: &DashboardSummary, copied: bool) {
    let stats = &summary.stats;
    println!("\n--- Referral Dashboard ---");
    println!(
        "Total Referrals:  {} ({:+}% this month)",
        stats.total_referrals, stats.growth_rate_referrals
    );
    println!(
        "Total Points:     {} ({:+}% this month)",
        stats.total_points, stats.growth_rate_points
    );
    println!(
        "Conversion Rate:  {}% ({:+}% this month)",
        stats.conversion_rate, stats.growth_rate_conversion
    );
    println!(
        "Total Amount:     {} {}",
        summary.formatted_amount, summary.currency.code
    );
    println!(
        "\nYour Referral Link: {}{}",
        summary.referral_link,
        if copied { "  (copied)" } else { "" }
    );
    println!("\nRecent Activity:");
    for entry in &summary.recent_activity {
        println!(
            "- {} ({} minutes ago) {}",
            entry.description, entry.minutes_ago, entry.points_label
        );
    }
    println!();
}

async fn edit_profile(
    container: &ServiceContainer,
    user: &AuthenticatedUser,
) -> CliResult<SaveAcknowledgement> {
    let current = container.settings_service.get_profile(user).await;

    let profile = ProfileSettings {
        full_name: Text::new("Full name:")
            .with_default(&current.full_name)
            .prompt()?,
        email: Text::new("Email:").with_default(&current.email).prompt()?,
        whatsapp_number: Text::new("WhatsApp number:")
            .with_default(&current.whatsapp_number)
            .prompt()?,
        whatsapp_channel_name: Text::new("WhatsApp group name:")
            .with_default(&current.whatsapp_channel_name)
            .prompt()?,
    };

    println!("Saving...");
    let ack = container
        .settings_service
        .update_profile(user, profile)
        .await?;
    println!("{}", ack.message);
    Ok(ack)
}

async fn edit_notifications(
    container: &ServiceContainer,
    user: &AuthenticatedUser,
) -> CliResult<SaveAcknowledgement> {
    let current = container.settings_service.get_notifications(user).await;

    let preferences = NotificationPreferences {
        email_notifications: Confirm::new("Email notifications?")
            .with_default(current.email_notifications)
            .prompt()?,
        whatsapp_notifications: Confirm::new("WhatsApp notifications?")
            .with_default(current.whatsapp_notifications)
            .prompt()?,
    };

    println!("Saving...");
    let ack = container
        .settings_service
        .update_notifications(user, preferences)
        .await?;
    println!("{}", ack.message);
    Ok(ack)
}

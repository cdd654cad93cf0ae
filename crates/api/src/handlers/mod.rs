pub mod auth;
pub mod brands;
pub mod campaign_stages;
pub mod campaigns;
pub mod existing_influencers;
pub mod influencers;
pub mod marketing;
pub mod negotiation;
pub mod otp;
pub mod products;
pub mod users;

use influx_notify::{EmailMessage, Notifier};

/// Send an email without failing the caller. Returns whether it went out.
pub(crate) async fn deliver_email(notifier: &dyn Notifier, message: EmailMessage) -> bool {
    let to = message.to.clone();
    match notifier.send(message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(to = %to, error = %e, "Email delivery failed");
            false
        }
    }
}

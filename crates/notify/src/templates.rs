//! Email templates sent to influencers.

use crate::{Attachment, EmailMessage};

const SIGNATURE: &str = "Regards,\nInfluencer Partnerships Team";

/// Sent after a successful onboarding submission.
pub fn onboarding_confirmation(to: &str, name: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "We received your onboarding details".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Thank you for submitting your onboarding form. Our team will review \
             your profile and get back to you shortly.\n\n{SIGNATURE}"
        ),
        attachment: None,
    }
}

/// Sent when an influencer is approved.
pub fn approval(to: &str, name: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Your profile has been approved".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Your profile has been approved. We will reach out with campaign \
             opportunities that match your work.\n\n{SIGNATURE}"
        ),
        attachment: None,
    }
}

/// Sent when an influencer is rejected. The reason is included when given.
pub fn rejection(to: &str, name: &str, reason: Option<&str>) -> EmailMessage {
    let reason_line = match reason.map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) => format!("Reason: {reason}\n\n"),
        None => String::new(),
    };
    EmailMessage {
        to: to.to_string(),
        subject: "Update on your onboarding application".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Thank you for your interest. Unfortunately we are unable to approve \
             your profile at this time.\n\n{reason_line}{SIGNATURE}"
        ),
        attachment: None,
    }
}

/// Invitation to fill in the onboarding form, optionally with the form PDF.
pub fn form_invitation(
    to: &str,
    name: &str,
    form_url: &str,
    attachment: Option<Attachment>,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Influencer onboarding form".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Please complete your onboarding using the link below:\n{form_url}\n\n{SIGNATURE}"
        ),
        attachment,
    }
}

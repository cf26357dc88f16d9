//! Pre-built Test Fixtures

use chrono::{Days, NaiveDate, Utc};
use domain_claims::ClaimSubmission;

/// Smallest byte string `image::guess_format` recognises as PNG
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// Smallest byte string recognised as JPEG
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0];

/// GIF header; a real image, but not an accepted format
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00";

pub fn png_photo() -> Vec<u8> {
    PNG_BYTES.to_vec()
}

pub fn jpeg_photo() -> Vec<u8> {
    JPEG_BYTES.to_vec()
}

/// A date of loss safely in the past
pub fn recent_loss_date() -> NaiveDate {
    Utc::now().date_naive() - Days::new(3)
}

/// A date of loss no time zone has reached yet
pub fn future_loss_date() -> NaiveDate {
    Utc::now().date_naive() + Days::new(2)
}

/// Submission with a rain photo, as in the approval scenario
pub fn rain_submission() -> ClaimSubmission {
    ClaimSubmission::new(
        "Marco Rossi",
        "marco.rossi@example.ch",
        recent_loss_date(),
        "8001",
        png_photo(),
    )
    .with_policy_no("DEMO-12345")
}

/// Submission with a fire photo, as in the denial scenario
pub fn fire_submission() -> ClaimSubmission {
    ClaimSubmission::new(
        "Sofia Weber",
        "sofia.weber@example.ch",
        recent_loss_date(),
        "Lausanne",
        jpeg_photo(),
    )
}

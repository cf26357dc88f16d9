//! Claim submissions as received from the intake form
//!
//! A [`ClaimSubmission`] is immutable once built. It is never persisted as
//! such; only the fields copied into the audit record survive.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::SubmissionId;
use crate::error::ClaimError;

/// A property-damage claim submitted by a claimant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClaimSubmission {
    /// Correlation identifier for logs; not persisted
    pub id: SubmissionId,
    /// Claimant full name
    #[validate(length(min = 1, max = 200, message = "claimant name is required"))]
    pub claimant_name: String,
    /// Claimant email, also the refund receipt address
    #[validate(email(message = "claimant email is not a valid address"))]
    pub claimant_email: String,
    /// Calendar date the damage occurred
    pub date_of_loss: NaiveDate,
    /// Free-text location or postcode
    #[validate(length(min = 1, max = 200, message = "location is required"))]
    pub location: String,
    /// Policy number, when the claimant supplied one
    pub policy_no: Option<String>,
    /// Raw bytes of the damage photo
    #[serde(skip)]
    pub photo: Vec<u8>,
}

impl ClaimSubmission {
    /// Creates a submission, trimming the text fields
    pub fn new(
        claimant_name: impl Into<String>,
        claimant_email: impl Into<String>,
        date_of_loss: NaiveDate,
        location: impl Into<String>,
        photo: Vec<u8>,
    ) -> Self {
        Self {
            id: SubmissionId::new_v7(),
            claimant_name: claimant_name.into().trim().to_string(),
            claimant_email: claimant_email.into().trim().to_string(),
            date_of_loss,
            location: location.into().trim().to_string(),
            policy_no: None,
            photo,
        }
    }

    /// Attaches a policy number
    pub fn with_policy_no(mut self, policy_no: impl Into<String>) -> Self {
        let policy_no = policy_no.into().trim().to_string();
        self.policy_no = (!policy_no.is_empty()).then_some(policy_no);
        self
    }

    /// Checks the submission before any collaborator is called
    ///
    /// Field rules come from the `Validate` derive; on top of those the date
    /// of loss may not lie after `today` and the photo must be a PNG or JPEG.
    /// Callers without a claimant time zone pass [`latest_local_date`].
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), ClaimError> {
        let mut problems: Vec<String> = Vec::new();

        if let Err(errors) = self.validate() {
            for (field, field_errors) in errors.field_errors() {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    problems.push(message);
                }
            }
        }

        if self.date_of_loss > today {
            problems.push(format!(
                "date of loss {} is in the future",
                self.date_of_loss
            ));
        }

        match photo_format(&self.photo) {
            Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
            Some(other) => problems.push(format!(
                "photo must be a PNG or JPEG image, got {:?}",
                other
            )),
            None if self.photo.is_empty() => problems.push("no photo uploaded".to_string()),
            None => problems.push("photo is not a recognised image".to_string()),
        }

        if problems.is_empty() {
            Ok(())
        } else {
            problems.sort();
            Err(ClaimError::Validation(problems))
        }
    }
}

/// Furthest UTC offset in use (UTC+14, Line Islands)
const MAX_UTC_OFFSET_HOURS: i64 = 14;

/// Latest calendar date that is "today" somewhere on Earth at `now`
///
/// The form sends a bare date in the claimant's local calendar, so the
/// future-date check compares against this rather than the UTC date.
pub fn latest_local_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(MAX_UTC_OFFSET_HOURS)).date_naive()
}

/// Sniffs the image format from the leading bytes
pub fn photo_format(photo: &[u8]) -> Option<ImageFormat> {
    if photo.is_empty() {
        return None;
    }
    image::guess_format(photo).ok()
}

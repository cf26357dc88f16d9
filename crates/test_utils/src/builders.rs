//! Test Data Builders
//!
//! Builders let tests set only the fields they care about; the rest are
//! valid defaults with faked claimant details.

use chrono::NaiveDate;
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use domain_claims::ClaimSubmission;

use crate::fixtures::{png_photo, recent_loss_date};

/// Builder for claim submissions
#[derive(Debug, Clone)]
pub struct ClaimSubmissionBuilder {
    name: String,
    email: String,
    date_of_loss: NaiveDate,
    location: String,
    policy_no: Option<String>,
    photo: Vec<u8>,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            name: Name().fake(),
            email: SafeEmail().fake(),
            date_of_loss: recent_loss_date(),
            location: CityName().fake(),
            policy_no: None,
            photo: png_photo(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn date_of_loss(mut self, date: NaiveDate) -> Self {
        self.date_of_loss = date;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn policy_no(mut self, policy_no: impl Into<String>) -> Self {
        self.policy_no = Some(policy_no.into());
        self
    }

    pub fn photo(mut self, photo: impl Into<Vec<u8>>) -> Self {
        self.photo = photo.into();
        self
    }

    pub fn build(self) -> ClaimSubmission {
        let submission =
            ClaimSubmission::new(self.name, self.email, self.date_of_loss, self.location, self.photo);
        match self.policy_no {
            Some(policy_no) => submission.with_policy_no(policy_no),
            None => submission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_build_is_valid() {
        let submission = ClaimSubmissionBuilder::new().build();
        assert!(submission.validate_at(Utc::now().date_naive()).is_ok());
    }

    #[test]
    fn test_overrides() {
        let submission = ClaimSubmissionBuilder::new()
            .email("x@example.com")
            .policy_no("99999")
            .build();
        assert_eq!(submission.claimant_email, "x@example.com");
        assert_eq!(submission.policy_no.as_deref(), Some("99999"));
    }
}

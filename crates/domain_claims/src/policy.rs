//! Policy number validation
//!
//! Claimants may quote a policy number; when they do it must be one the
//! insurer knows. The check runs before the claim pipeline starts.

use async_trait::async_trait;
use std::collections::HashSet;

use core_kernel::{DomainPort, PortError};
use crate::error::ClaimError;

/// Policy numbers accepted when none are configured
pub const DEFAULT_KNOWN_POLICIES: &[&str] = &["DEMO-12345", "DEMO-678910", "DEMO-11111", "99999"];

/// Looks up whether a policy number exists
#[async_trait]
pub trait PolicyValidator: DomainPort {
    async fn is_valid(&self, policy_no: &str) -> Result<bool, PortError>;
}

/// Canonical form used for comparisons: trimmed and upper-cased
pub fn normalize_policy_no(policy_no: &str) -> String {
    policy_no.trim().to_uppercase()
}

/// Fixed set of known policy numbers
#[derive(Debug, Clone)]
pub struct StaticPolicyRegistry {
    known: HashSet<String>,
}

impl StaticPolicyRegistry {
    pub fn new<I, S>(policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: policies
                .into_iter()
                .map(|p| normalize_policy_no(p.as_ref()))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn contains(&self, policy_no: &str) -> bool {
        self.known.contains(&normalize_policy_no(policy_no))
    }
}

impl Default for StaticPolicyRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_POLICIES.iter().copied())
    }
}

impl DomainPort for StaticPolicyRegistry {}

#[async_trait]
impl PolicyValidator for StaticPolicyRegistry {
    async fn is_valid(&self, policy_no: &str) -> Result<bool, PortError> {
        Ok(self.contains(policy_no))
    }
}

/// Rejects a submission quoting a policy number the validator does not know
///
/// Submissions without a policy number pass.
pub async fn ensure_known_policy(
    validator: &dyn PolicyValidator,
    policy_no: Option<&str>,
) -> Result<(), ClaimError> {
    let Some(policy_no) = policy_no else {
        return Ok(());
    };
    if validator
        .is_valid(policy_no)
        .await
        .map_err(ClaimError::PolicyLookup)?
    {
        Ok(())
    } else {
        Err(ClaimError::PolicyNotFound(policy_no.to_string()))
    }
}

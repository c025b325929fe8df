//! In-memory manual review overrides
//!
//! Overrides are recorded by the review team out of band; the workflow only
//! ever reads them. The seeded store clears the watchlist hit for the
//! sandbox persona a reviewer has already worked.

use std::collections::HashSet;

use async_trait::async_trait;

use domain_application::OverrideStore;
use domain_underwriting::OverrideType;

pub struct InMemoryOverrideStore {
    cleared: HashSet<(String, OverrideType)>,
}

impl InMemoryOverrideStore {
    pub fn empty() -> Self {
        Self {
            cleared: HashSet::new(),
        }
    }

    /// A store pre-loaded with the sandbox overrides
    pub fn seeded() -> Self {
        Self::with_overrides(vec![("987-65-4444".to_string(), OverrideType::Watchlist)])
    }

    pub fn with_overrides(overrides: Vec<(String, OverrideType)>) -> Self {
        Self {
            cleared: overrides.into_iter().collect(),
        }
    }
}

#[async_trait]
impl OverrideStore for InMemoryOverrideStore {
    async fn has_override(&self, ssn: &str, override_type: OverrideType) -> bool {
        self.cleared.contains(&(ssn.to_string(), override_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_watchlist_override() {
        let store = InMemoryOverrideStore::seeded();
        assert!(store.has_override("987-65-4444", OverrideType::Watchlist).await);
        assert!(
            !store
                .has_override("987-65-4444", OverrideType::ExtendedFraudVictim)
                .await
        );
        assert!(!store.has_override("987-65-1111", OverrideType::Watchlist).await);
    }
}

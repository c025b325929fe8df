//! Builder for a fully wired origination service
//!
//! Defaults to the sandbox bureau, the seeded merchant, and the seeded
//! overrides; tests override the pieces they care about.

use std::sync::Arc;

use core_kernel::MerchantId;
use domain_application::{
    CreditBureauPort, MerchantConfiguration, OriginationService, OverrideStore,
};
use infra_mem::{
    seed_merchant, InMemoryApplicationStore, InMemoryMerchantStore, InMemoryOverrideStore,
    InMemoryScheduleStore, SandboxCreditBureau,
};

pub struct OriginationServiceBuilder {
    merchants: Vec<MerchantConfiguration>,
    bureau: Arc<dyn CreditBureauPort>,
    overrides: Arc<dyn OverrideStore>,
}

impl Default for OriginationServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginationServiceBuilder {
    pub fn new() -> Self {
        Self {
            merchants: vec![seed_merchant()],
            bureau: Arc::new(SandboxCreditBureau::new()),
            overrides: Arc::new(InMemoryOverrideStore::seeded()),
        }
    }

    pub fn with_merchant(mut self, merchant: MerchantConfiguration) -> Self {
        self.merchants.push(merchant);
        self
    }

    pub fn with_bureau(mut self, bureau: Arc<dyn CreditBureauPort>) -> Self {
        self.bureau = bureau;
        self
    }

    pub fn with_overrides(mut self, overrides: Arc<dyn OverrideStore>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn build(self) -> Arc<OriginationService> {
        Arc::new(OriginationService::new(
            Arc::new(InMemoryApplicationStore::new()),
            Arc::new(InMemoryScheduleStore::new()),
            Arc::new(InMemoryMerchantStore::with_merchants(self.merchants)),
            self.bureau,
            self.overrides,
        ))
    }
}

/// The seed merchant's id, which every fresh deployment serves
pub fn seed_merchant_id() -> MerchantId {
    seed_merchant().merchant_id
}

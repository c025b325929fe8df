//! In-memory merchant store

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use uuid::uuid;

use core_kernel::{Currency, MerchantId, Money};
use domain_application::{MerchantConfiguration, MerchantStore};

/// The merchant seeded into every fresh deployment, with a fixed id so the
/// storefront can hard-code it.
pub fn seed_merchant() -> MerchantConfiguration {
    MerchantConfiguration {
        merchant_id: MerchantId::from_uuid(uuid!("4f572866-0e85-11ea-94a8-acde48001122")),
        name: "Pemberley Books".to_string(),
        minimum_loan_amount: Money::new(dec!(100.00), Currency::USD),
        maximum_loan_amount: Money::new(dec!(3000.00), Currency::USD),
    }
}

pub struct InMemoryMerchantStore {
    records: HashMap<MerchantId, MerchantConfiguration>,
}

impl InMemoryMerchantStore {
    /// A store pre-loaded with the seed merchant
    pub fn seeded() -> Self {
        Self::with_merchants(vec![seed_merchant()])
    }

    pub fn with_merchants(merchants: Vec<MerchantConfiguration>) -> Self {
        Self {
            records: merchants
                .into_iter()
                .map(|merchant| (merchant.merchant_id, merchant))
                .collect(),
        }
    }
}

#[async_trait]
impl MerchantStore for InMemoryMerchantStore {
    async fn get(&self, merchant_id: MerchantId) -> Option<MerchantConfiguration> {
        self.records.get(&merchant_id).cloned()
    }
}

use serde_json::json;

use crate::error::Result;
use crate::provider::ProviderSet;
use crate::resource::extract_resource_group;
use crate::rules::{Check, Finding};

/// Flags storage accounts whose extended properties allow anonymous blob
/// access. The listing descriptor alone is not enough — the property bag
/// is fetched per account through the provider.
pub struct StoragePublicAccessCheck;

impl Check for StoragePublicAccessCheck {
    fn service(&self) -> &'static str {
        "Storage"
    }

    fn run(&self, providers: &ProviderSet) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for account in providers.storage.list_accounts()? {
            let rg = match extract_resource_group(&account.id) {
                Ok(rg) => rg.to_owned(),
                Err(e) => {
                    tracing::warn!(account = %account.name, error = %e, "skipping account with malformed id");
                    continue;
                }
            };
            let props = providers.storage.account_properties(&rg, &account.name)?;

            if props.allow_blob_public_access == Some(true) {
                let mut finding = Finding::new(
                    "AZ-STG-PUBLIC-BLOB",
                    self.service(),
                    account.name.clone(),
                    "STG_PUBLIC_BLOB",
                    "Public blob access enabled",
                );
                if let Some(kind) = &account.kind {
                    finding = finding.with_metadata("account_type", json!(kind));
                }
                findings.push(finding);
            }
        }

        Ok(findings)
    }
}

//! Storage account operations.

use super::rest::{ArmClient, ArmResponse};
use crate::config::STORAGE_API;
use crate::models::resource_id::resource_id;
use crate::models::storage::StorageAccount;
use crate::names::is_valid_storage_account_name;
use std::error::Error;

/// Create a storage account. ARM answers 202 and provisions asynchronously.
///
/// Names must be 3-24 lowercase letters/digits; others are rejected before any request.
pub async fn create_storage_account(
    client: &ArmClient,
    rg: &str,
    account_name: &str,
    location: &str,
    storage_type: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    if !is_valid_storage_account_name(account_name) {
        return Err(format!("Invalid storage account name: {account_name:?}").into());
    }
    let path = resource_id(
        client.subscription_id(),
        rg,
        "Microsoft.Storage/storageAccounts",
        account_name,
    );
    let body = StorageAccount::new(location, storage_type);
    client.put_json(&path, STORAGE_API, &body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_name_rejected_without_request() {
        // Nothing listens on port 9; the name check must fail first.
        let client = ArmClient::new("http://127.0.0.1:9", "sub", "tok").unwrap();
        let err = create_storage_account(&client, "rg", "Bad_Name", "westus", "Standard_LRS")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid storage account name: \"Bad_Name\"");
    }
}

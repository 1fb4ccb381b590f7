//! Storage account request body.

use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct StorageSku {
    pub name: String,
}

/// `PUT .../Microsoft.Storage/storageAccounts/{name}` body.
#[derive(Serialize, Debug, Clone)]
pub struct StorageAccount {
    pub location: String,
    pub sku: StorageSku,
    pub kind: String,
}

impl StorageAccount {
    /// General purpose account, e.g. `storage_type = "Standard_LRS"`.
    pub fn new(location: &str, storage_type: &str) -> StorageAccount {
        StorageAccount {
            location: location.to_string(),
            sku: StorageSku {
                name: storage_type.to_string(),
            },
            kind: "Storage".to_string(),
        }
    }
}

/// Blob container URL used for a scale set's os disk VHDs.
pub fn vhd_container_url(account_name: &str, vmss_name: &str) -> String {
    format!("https://{account_name}.blob.core.windows.net/{vmss_name}vhd")
}

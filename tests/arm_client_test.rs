//! ARM client calls outside the scenario: tokens, reads, scaling, deletes.

mod common;

use azure_autoscale_rm::azure::{
    compute, get_access_token, insights, resources, ArmClient, TokenSource,
};
use azure_autoscale_rm::config::{load_config, status, COMPUTE_API};
use azure_autoscale_rm::connect;
use azure_autoscale_rm::models::compute::VmssResource;
use azure_autoscale_rm::models::{ImageReference, VmAuth, VmssParams};
use common::{FakeArm, TEST_TOKEN};

const SUB: &str = "sub-0001";

fn vmss_params() -> VmssParams {
    VmssParams {
        name: "vmss1".to_string(),
        location: "westus".to_string(),
        vm_size: "Standard_D1".to_string(),
        capacity: 1,
        image: ImageReference::new("Canonical", "UbuntuServer", "16.04.0-LTS", "latest"),
        vhd_containers: vec!["https://aaaaaaaaaa.blob.core.windows.net/vmss1vhd".to_string()],
        subnet_id: "/subnet".to_string(),
        backend_pool_id: "/be".to_string(),
        nat_pool_id: "/nat".to_string(),
        username: "rootuser".to_string(),
        auth: VmAuth::SshKey("ssh-rsa AAAAB3Nza".to_string()),
    }
}

#[tokio::test]
async fn test_get_access_token_from_authority() {
    let fake = FakeArm::default();
    let base = fake.start().await;

    let token = get_access_token(&base, "tenant-1", "app-1", "secret-1")
        .await
        .expect("token");
    assert_eq!(token, TEST_TOKEN);

    let calls = fake.calls();
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].path, "/tenant-1/oauth2/token");
}

#[tokio::test]
async fn test_get_access_token_rejected() {
    let fake = FakeArm::failing_on("oauth2/token");
    let base = fake.start().await;

    let err = get_access_token(&base, "tenant-1", "app-1", "bad")
        .await
        .expect_err("token should be rejected");
    assert!(err.to_string().starts_with("Token request rejected"), "{err}");
}

#[tokio::test]
async fn test_connect_uses_service_principal_token() {
    let fake = FakeArm::default();
    let base = fake.start().await;
    let config = load_config("src/tests/test_data/azurermconfig_test.json").unwrap();

    let client = connect(&config, TokenSource::ServicePrincipal, &base, &base)
        .await
        .expect("connect");
    assert_eq!(client.subscription_id(), "sub-0001");

    resources::create_resource_group(&client, "rg1", &config.location)
        .await
        .unwrap()
        .expect_status(status::CREATED, "create rg")
        .unwrap();

    let calls = fake.calls();
    assert_eq!(calls[0].path, "/11111111-2222-3333-4444-555555555555/oauth2/token");
    assert_eq!(calls[1].method, "PUT");
    assert_eq!(calls[1].path, "/subscriptions/sub-0001/resourceGroups/rg1");
    assert_eq!(calls[1].body["location"], "westus");
    assert_eq!(calls[1].authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_resource_group_get_list_delete() {
    let fake = FakeArm::default();
    let base = fake.start().await;
    let client = ArmClient::new(&base, SUB, TEST_TOKEN).unwrap();

    for rg in ["rga", "rgb"] {
        resources::create_resource_group(&client, rg, "westus")
            .await
            .unwrap()
            .expect_status(status::CREATED, "create rg")
            .unwrap();
    }

    let got = resources::get_resource_group(&client, "rga").await.unwrap();
    assert_eq!(got.status, status::OK);
    assert_eq!(got.str_at("/name"), Some("rga"));

    let listed = resources::list_resource_groups(&client).await.unwrap();
    assert_eq!(
        listed.body["value"].as_array().map(Vec::len),
        Some(2),
        "{}",
        listed.body
    );

    let deleted = resources::delete_resource_group(&client, "rga").await.unwrap();
    assert_eq!(deleted.status, status::ACCEPTED);
    assert!(deleted.body.is_null());

    let listed = resources::list_resource_groups(&client).await.unwrap();
    assert_eq!(listed.body["value"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_vmss_create_get_and_scale() {
    let fake = FakeArm::default();
    let base = fake.start().await;
    let client = ArmClient::new(&base, SUB, TEST_TOKEN).unwrap();

    compute::create_vmss(&client, "rg1", &vmss_params())
        .await
        .unwrap()
        .expect_status(status::CREATED, "create vmss")
        .unwrap();
    assert!(fake.calls()[0].query.contains(&format!("api-version={COMPUTE_API}")));

    let scaled = compute::scale_vmss(&client, "rg1", "vmss1", "Standard_D2", "Standard", 4)
        .await
        .unwrap()
        .expect_status(status::OK, "scale vmss")
        .unwrap();
    assert_eq!(scaled.str_at("/sku/name"), Some("Standard_D2"));
    assert_eq!(fake.calls()[1].method, "PATCH");

    let vmss: VmssResource = compute::get_vmss(&client, "rg1", "vmss1")
        .await
        .unwrap()
        .parse("vmss")
        .unwrap();
    assert_eq!(vmss.name, "vmss1");
    assert_eq!(vmss.sku.capacity, 4);
    assert!(vmss.id.ends_with("/virtualMachineScaleSets/vmss1"));
}

#[tokio::test]
async fn test_get_and_delete_autoscale_setting() {
    use azure_autoscale_rm::models::{AutoscaleSettingResource, ScaleCapacity};

    let fake = FakeArm::default();
    let base = fake.start().await;
    let client = ArmClient::new(&base, SUB, TEST_TOKEN).unwrap();

    insights::create_autoscale_setting(
        &client,
        "rg1",
        "cpu",
        "vmss1",
        "westus",
        ScaleCapacity::new(1, 5, 2).unwrap(),
        vec![],
        Some("ops@example.com"),
    )
    .await
    .unwrap()
    .expect_status(status::CREATED, "create setting")
    .unwrap();

    let setting: AutoscaleSettingResource = insights::get_autoscale_setting(&client, "rg1", "cpu")
        .await
        .unwrap()
        .parse("setting")
        .unwrap();
    assert_eq!(setting.name, "cpu");
    assert_eq!(setting.properties.notifications.len(), 1);
    assert_eq!(setting.properties.profiles[0].capacity.maximum, "5");

    let deleted = insights::delete_autoscale_setting(&client, "rg1", "cpu")
        .await
        .unwrap();
    assert_eq!(deleted.status, status::ACCEPTED);
}

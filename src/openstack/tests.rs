//! Unit tests for the OpenStack inventory client.

use super::*;
use crate::test_support::{ScriptedTransport, json_cinder_volumes, keystone_token_response};
use crate::transport::{HttpResponse, Method};
use rstest::{fixture, rstest};
use serde_json::json;

const ENDPOINT: &str = "https://cinder.example:8776/v3/9a8b7c";

#[fixture]
fn settings() -> OpenStackSettings {
    OpenStackSettings {
        auth_url: String::from("https://keystone.example:5000/v3"),
        tenant: String::from("admin"),
        username: String::from("admin"),
        password: String::from("secret"),
        user_domain: String::from("Default"),
        project_domain: String::from("Default"),
        region: None,
    }
}

async fn connected(transport: &ScriptedTransport) -> OpenStackClient<ScriptedTransport> {
    transport.push(keystone_token_response("tok-123", ENDPOINT));
    OpenStackClient::connect(&settings(), transport.clone())
        .await
        .expect("connect should succeed")
}

#[rstest]
#[case("https://keystone.example:5000", "https://keystone.example:5000/v3")]
#[case("https://keystone.example:5000/", "https://keystone.example:5000/v3")]
#[case("https://keystone.example:5000/v3", "https://keystone.example:5000/v3")]
#[case("https://keystone.example:5000/v3/", "https://keystone.example:5000/v3")]
#[case("https://keystone.example:5000/v2.0", "https://keystone.example:5000/v3")]
#[case("https://keystone.example:5000/v2.0/", "https://keystone.example:5000/v3")]
#[case("https://keystone.example/identity/v2", "https://keystone.example/identity/v3")]
#[case("https://keystone.example/identity", "https://keystone.example/identity/v3")]
fn identity_url_targets_v3(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(identity_url(input), expected);
}

#[tokio::test]
async fn connect_posts_password_credentials_scoped_to_the_tenant() {
    let transport = ScriptedTransport::new();
    let client = connected(&transport).await;

    assert_eq!(client.volume_endpoint(), ENDPOINT);
    let requests = transport.requests();
    let auth = requests.first().expect("auth request recorded");
    assert_eq!(auth.method, Method::Post);
    assert_eq!(auth.url, "https://keystone.example:5000/v3/auth/tokens");
    let body = auth.json.as_ref().expect("auth body");
    assert_eq!(
        body.pointer("/auth/identity/password/user/name"),
        Some(&json!("admin"))
    );
    assert_eq!(
        body.pointer("/auth/identity/password/user/password"),
        Some(&json!("secret"))
    );
    assert_eq!(
        body.pointer("/auth/scope/project/name"),
        Some(&json!("admin"))
    );
    assert_eq!(
        body.pointer("/auth/scope/project/domain/name"),
        Some(&json!("Default"))
    );
}

#[tokio::test]
async fn connect_surfaces_rejected_credentials() {
    let transport = ScriptedTransport::new();
    transport.push_response(
        401,
        r#"{"error":{"code":401,"message":"The request you have made requires authentication.","title":"Unauthorized"}}"#,
    );

    let result = OpenStackClient::connect(&settings(), transport).await;

    let Err(err) = result else {
        panic!("expected authentication failure");
    };
    assert_eq!(
        err,
        OpenStackError::Authentication {
            status: 401,
            message: String::from("The request you have made requires authentication."),
        }
    );
}

#[tokio::test]
async fn connect_requires_subject_token_header() {
    let transport = ScriptedTransport::new();
    transport.push(HttpResponse::new(201, r#"{"token":{"catalog":[]}}"#));

    let result = OpenStackClient::connect(&settings(), transport).await;

    assert!(matches!(result, Err(OpenStackError::MissingToken)));
}

#[tokio::test]
async fn connect_requires_a_block_storage_endpoint() {
    let transport = ScriptedTransport::new();
    transport.push(
        HttpResponse::new(201, r#"{"token":{"catalog":[{"type":"compute","endpoints":[]}]}}"#)
            .with_header("X-Subject-Token", "tok"),
    );

    let result = OpenStackClient::connect(&settings(), transport).await;

    assert!(matches!(
        result,
        Err(OpenStackError::EndpointNotFound { .. })
    ));
}

#[tokio::test]
async fn region_filter_selects_matching_endpoint() {
    let transport = ScriptedTransport::new();
    let catalog = json!({
        "token": {
            "catalog": [{
                "type": "volumev3",
                "endpoints": [
                    {"interface": "public", "region": "RegionOne", "url": "https://one.example/v3/p"},
                    {"interface": "public", "region_id": "RegionTwo", "url": "https://two.example/v3/p/"}
                ]
            }]
        }
    });
    transport.push(
        HttpResponse::new(201, catalog.to_string()).with_header("x-subject-token", "tok"),
    );
    let regional = OpenStackSettings {
        region: Some(String::from("RegionTwo")),
        ..settings()
    };

    let client = OpenStackClient::connect(&regional, transport)
        .await
        .expect("connect should succeed");

    assert_eq!(client.volume_endpoint(), "https://two.example/v3/p");
}

#[tokio::test]
async fn block_storage_service_type_is_preferred() {
    let transport = ScriptedTransport::new();
    let catalog = json!({
        "token": {
            "catalog": [
                {"type": "volumev2", "endpoints": [{"interface": "public", "url": "https://v2.example"}]},
                {"type": "block-storage", "endpoints": [{"interface": "public", "url": "https://bs.example"}]}
            ]
        }
    });
    transport.push(
        HttpResponse::new(201, catalog.to_string()).with_header("X-Subject-Token", "tok"),
    );

    let client = OpenStackClient::connect(&settings(), transport)
        .await
        .expect("connect should succeed");

    assert_eq!(client.volume_endpoint(), "https://bs.example");
}

#[rstest]
#[case(true, "https://cinder.example:8776/v3/9a8b7c/volumes/detail?all_tenants=True")]
#[case(false, "https://cinder.example:8776/v3/9a8b7c/volumes/detail")]
#[tokio::test]
async fn list_volumes_queries_details(#[case] all_tenants: bool, #[case] expected_url: &str) {
    let transport = ScriptedTransport::new();
    let client = connected(&transport).await;
    transport.push_response(
        200,
        json_cinder_volumes(&[
            ("12345678-1234-5678-1234-567812345678", true),
            ("87654321-4321-8765-4321-876543218765", false),
        ]),
    );

    let volumes = client
        .list_volumes(all_tenants)
        .await
        .expect("listing should succeed");

    assert_eq!(
        volumes,
        vec![
            CloudVolume::new("12345678-1234-5678-1234-567812345678", 1),
            CloudVolume::new("87654321-4321-8765-4321-876543218765", 0),
        ]
    );
    let listing = transport.requests().pop().expect("listing request");
    assert_eq!(listing.url, expected_url);
    assert!(
        listing
            .headers
            .contains(&(String::from("X-Auth-Token"), String::from("tok-123")))
    );
}

#[tokio::test]
async fn null_attachments_count_as_detached() {
    let transport = ScriptedTransport::new();
    let client = connected(&transport).await;
    transport.push_response(200, r#"{"volumes":[{"id":"vol-1","attachments":null}]}"#);

    let volumes = client.list_volumes(false).await.expect("listing");

    assert_eq!(volumes, vec![CloudVolume::new("vol-1", 0)]);
    assert!(!volumes.iter().any(CloudVolume::is_attached));
}

#[tokio::test]
async fn list_volumes_surfaces_forbidden_all_tenants() {
    let transport = ScriptedTransport::new();
    let client = connected(&transport).await;
    transport.push_response(403, r#"{"forbidden":{"code":403,"message":"Policy doesn't allow"}}"#);

    let err = client
        .list_volumes(true)
        .await
        .expect_err("listing should fail");

    assert_eq!(
        err,
        OpenStackError::Listing {
            status: 403,
            message: String::from("Policy doesn't allow"),
        }
    );
}

#[tokio::test]
async fn list_volumes_rejects_unexpected_payloads() {
    let transport = ScriptedTransport::new();
    let client = connected(&transport).await;
    transport.push_response(200, "<html>proxy error</html>");

    let err = client
        .list_volumes(false)
        .await
        .expect_err("listing should fail");

    assert!(
        matches!(err, OpenStackError::Parse { ref resource, .. } if resource == "volumes"),
        "got {err:?}"
    );
}

mod common;

use anyhow::Result;
use common::{mock_transport, JSON};
use httpmock::prelude::*;
use pmm_api_tests::api::alertmanager::ALERTMANAGER_BASE_PATH;
use pmm_api_tests::api::management::RemoveServiceBody;
use pmm_api_tests::api::{AlertmanagerClient, ManagementClient, ServerClient};
use pmm_api_tests::{ApiTestError, Transport};
use serde_json::json;
use url::Url;

#[tokio::test]
async fn test_basic_auth_from_url() -> Result<()> {
    let server = MockServer::start();

    // admin:admin
    let readyz = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyz")
            .header("authorization", "Basic YWRtaW46YWRtaW4=");
        then.status(200).header("content-type", JSON).body("{}");
    });

    let client = ServerClient::new(mock_transport(&server));
    client.readiness().await?;

    readyz.assert();
    Ok(())
}

#[tokio::test]
async fn test_basic_auth_decodes_percent_encoded_password() -> Result<()> {
    let server = MockServer::start();

    // admin:p@ss
    let readyz = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyz")
            .header("authorization", "Basic YWRtaW46cEBzcw==");
        then.status(200).header("content-type", JSON).body("{}");
    });

    let url = Url::parse(&format!("http://admin:p%40ss@{}/", server.address()))?;
    let client = ServerClient::new(Transport::new(&url, false)?);
    client.readiness().await?;

    readyz.assert();
    Ok(())
}

#[tokio::test]
async fn test_version_is_decoded() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/version");
        then.status(200).header("content-type", JSON).json_body(json!({
            "version": "2.41.0",
            "server": {"version": "2.41.0", "full_version": "2.41.0-20.2312.abc"},
            "distribution_method": "DOCKER"
        }));
    });

    let version = ServerClient::new(mock_transport(&server)).version().await?;
    assert_eq!(version.version, "2.41.0");
    assert_eq!(version.server.unwrap().full_version, "2.41.0-20.2312.abc");
    assert!(version.managed.is_none());
    Ok(())
}

#[tokio::test]
async fn test_html_response_is_nginx_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/readyz");
        then.status(502)
            .header("content-type", "text/html")
            .body("<html><body>502 Bad Gateway</body></html>");
    });

    let err = ServerClient::new(mock_transport(&server))
        .readiness()
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "response from nginx: <html><body>502 Bad Gateway</body></html>"
    );
    Ok(())
}

#[tokio::test]
async fn test_html_wins_over_success_status() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/version");
        then.status(200)
            .header("content-type", "text/plain; charset=utf-8")
            .body("maintenance");
    });

    let err = ServerClient::new(mock_transport(&server))
        .version()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiTestError::FromNginx(body) if body == "maintenance"));
    Ok(())
}

#[tokio::test]
async fn test_json_error_is_api_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/version");
        then.status(401).header("content-type", JSON).json_body(json!({
            "error": "Unauthorized",
            "code": 16,
            "message": "Unauthorized"
        }));
    });

    let err = ServerClient::new(mock_transport(&server))
        .version()
        .await
        .unwrap_err();
    match err {
        ApiTestError::ApiError {
            operation,
            code,
            payload,
        } => {
            assert_eq!(operation, "Version");
            assert_eq!(code, 401);
            assert_eq!(payload["code"], 16);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_logs_zip_bytes() -> Result<()> {
    let server = MockServer::start();
    let archive: &[u8] = b"PK\x03\x04fake-zip";

    server.mock(|when, then| {
        when.method(GET).path("/logs.zip");
        then.status(200)
            .header("content-type", "application/zip")
            .body(archive);
    });

    let logs = ServerClient::new(mock_transport(&server)).logs().await?;
    assert_eq!(&logs[..], archive);
    Ok(())
}

#[tokio::test]
async fn test_logs_zip_error_status_is_api_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/logs.zip");
        then.status(500)
            .header("content-type", "application/zip")
            .body(b"PK\x03\x04partial");
    });

    let result = ServerClient::new(mock_transport(&server)).logs().await;
    match result {
        Err(ApiTestError::ApiError { operation, code, .. }) => {
            assert_eq!(operation, "Logs");
            assert_eq!(code, 500);
        }
        other => panic!("expected API error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_content_type_is_nginx_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/version");
        then.status(200).body("upstream timed out");
    });

    let err = ServerClient::new(mock_transport(&server))
        .version()
        .await
        .err()
        .unwrap();
    assert!(matches!(&err, ApiTestError::FromNginx(body) if body == "upstream timed out"));
    assert_eq!(err.to_string(), "response from nginx: upstream timed out");
    Ok(())
}

#[tokio::test]
async fn test_alertmanager_base_path() -> Result<()> {
    let server = MockServer::start();

    let status = server.mock(|when, then| {
        when.method(GET)
            .path("/alertmanager/api/v2/status")
            .header("authorization", "Basic YWRtaW46YWRtaW4=");
        then.status(200)
            .header("content-type", JSON)
            .json_body(json!({"cluster": {"status": "ready"}}));
    });

    let client =
        AlertmanagerClient::new(mock_transport(&server).with_base_path(ALERTMANAGER_BASE_PATH));
    let body = client.status().await?;
    assert_eq!(body["cluster"]["status"], "ready");

    status.assert();
    Ok(())
}

#[tokio::test]
async fn test_management_remove_service_by_name() -> Result<()> {
    let server = MockServer::start();

    let remove = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/management/Service/Remove")
            .json_body(json!({"service_type": "MYSQL_SERVICE", "service_name": "mysql-1"}));
        then.status(200).header("content-type", JSON).body("{}");
    });

    let client = ManagementClient::new(mock_transport(&server));
    client
        .remove_service(&RemoveServiceBody {
            service_type: Some("MYSQL_SERVICE".to_string()),
            service_name: "mysql-1".to_string(),
            ..Default::default()
        })
        .await?;

    remove.assert();
    Ok(())
}

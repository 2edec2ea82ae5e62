//! Execution tests for fetching single resources.
//!
//! Uses wiremock to mock the API and test the actual request flow.

use ophal::{Get, HalClient, HalError, Project, Resource, TypeRegistry, UserPreferences};
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project_json() -> serde_json::Value {
    serde_json::json!({
        "_type": "Project",
        "id": 3,
        "identifier": "lectio",
        "name": "Lectio",
        "active": true,
        "_links": {"self": {"href": "/api/v3/projects/3", "title": "Lectio"}}
    })
}

#[tokio::test]
async fn test_get_project_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let project = Project::get(&client, 3).await.unwrap();

    assert_eq!(project.id(), 3);
    assert_eq!(project.identifier(), "lectio");
}

#[tokio::test]
async fn test_api_key_sent_as_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .and(basic_auth("apikey", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri())
        .unwrap()
        .with_api_key("secret");
    client.get("/api/v3/projects/3").await.unwrap();
}

#[tokio::test]
async fn test_error_document_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "_type": "Error",
            "errorIdentifier": "urn:openproject-org:api:v3:errors:NotFound",
            "message": "The requested resource could not be found."
        })))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let err = Project::get(&client, 99).await.unwrap_err();

    let api_error = err.api_error().expect("expected an API error");
    assert_eq!(
        api_error.error_identifier,
        "urn:openproject-org:api:v3:errors:NotFound"
    );
    assert_eq!(api_error.message, "The requested resource could not be found.");
}

#[tokio::test]
async fn test_error_document_with_success_status_is_still_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "Error",
            "errorIdentifier": "urn:openproject-org:api:v3:errors:MultipleErrors",
            "message": "Multiple field constraints have been violated.",
            "_embedded": {"errors": [
                {"_type": "Error", "errorIdentifier": "urn:openproject-org:api:v3:errors:PropertyConstraintViolation",
                 "message": "Subject can't be blank."}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let err = client.get("/api/v3/projects/3").await.unwrap_err();

    let api_error = err.api_error().expect("expected an API error");
    assert!(api_error.is_multiple());
    assert_eq!(api_error.errors[0].message, "Subject can't be blank.");
}

#[tokio::test]
async fn test_non_hal_error_page_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let err = client.get("/api/v3/projects/3").await.unwrap_err();

    assert!(matches!(err, HalError::Status { status: 502, .. }));
}

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let err = client.get("/api/v3/projects").await.unwrap_err();

    assert!(matches!(
        err,
        HalError::RateLimited {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_wrong_type_is_unexpected_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "User", "id": 3
        })))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let err = Project::get(&client, 3).await.unwrap_err();

    assert!(matches!(
        err,
        HalError::UnexpectedResource {
            expected: "Project",
            ..
        }
    ));
}

#[tokio::test]
async fn test_custom_registry_decodes_unknown_type_generically() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/projects/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json()))
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri())
        .unwrap()
        .with_registry(TypeRegistry::empty());
    let res = client.get("/api/v3/projects/3").await.unwrap();

    let Resource::Generic(object) = res else {
        panic!("Expected a generic resource");
    };
    assert_eq!(object.string("name"), "Lectio");
}

#[tokio::test]
async fn test_current_user_preferences() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/my_preferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "UserPreferences",
            "hideMail": false,
            "timeZone": "Europe/Berlin",
            "_links": {"user": {"href": "/api/v3/users/4"}}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_type": "User", "id": 4, "login": "test1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HalClient::new(&mock_server.uri()).unwrap();
    let prefs = UserPreferences::current(&client).await.unwrap();
    assert_eq!(prefs.time_zone(), "Europe/Berlin");

    let user = prefs.user(&client).await.unwrap();
    assert_eq!(user.login(), "test1");
}

//! End-to-end behaviour of the roster pages: initial load from a stubbed
//! remote resource, listing, editing, deleting and the detail route.

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster::Trace;
use roster::domain::ports::RemoteUserSource;
use roster::domain::{LoadOutcome, UserCollection, UserDirectory, UserId};
use roster::inbound::http::configure;
use roster::inbound::http::health::HealthState;
use roster::inbound::http::state::HttpState;
use roster::inbound::http::views::Views;
use roster::outbound::remote_users::RemoteUsersHttpSource;

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).expect("zero offset")
}

fn empty_directory() -> Arc<UserDirectory> {
    Arc::new(UserDirectory::new(
        Arc::new(UserCollection::new()),
        Arc::new(DefaultClock),
        utc(),
    ))
}

async fn stub_remote(users: serde_json::Value) -> (MockServer, RemoteUsersHttpSource) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(&server)
        .await;
    let base = Url::parse(&server.uri()).expect("mock server URL");
    let source = RemoteUsersHttpSource::new(&base, Duration::from_secs(5)).expect("client");
    (server, source)
}

async fn loaded_directory() -> (MockServer, Arc<UserDirectory>) {
    let (server, source) = stub_remote(json!([
        {"id": 1, "name": "Bob", "surname": "Stone", "email": "bob@example.com",
         "skills": ["rust"], "date": "2024-05-01T10:00:00.000Z"},
        {"id": 2, "name": "Ann", "surname": "Lee", "email": "ann@example.com",
         "skills": [], "date": "2024-05-02T11:30:00.000Z"},
        {"id": 3, "name": "Cid", "surname": "", "email": "cid@example.com",
         "skills": ["go", "sql"], "date": "2024-05-03T09:15:00.000Z"}
    ]))
    .await;
    let directory = empty_directory();
    let outcome = directory.load_initial(&source).await;
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            loaded: 3,
            rejected: 0
        }
    );
    (server, directory)
}

macro_rules! roster_app {
    ($directory:expr) => {{
        let views = Views::new().expect("templates parse");
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        test::init_service(
            App::new()
                .app_data(health)
                .app_data(web::Data::new(HttpState::new(
                    $directory.clone(),
                    Arc::new(views),
                )))
                .wrap(Trace)
                .configure(configure),
        )
    }};
}

async fn text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(response).await.to_vec()).expect("utf8")
}

fn ids(directory: &UserDirectory) -> Vec<u64> {
    directory
        .store()
        .snapshot()
        .iter()
        .map(|r| r.id().get())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn loaded_collection_lists_in_both_orders() {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;

    let asc = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/?sort=alphabetical-asc")
            .to_request(),
    )
    .await;
    assert!(asc.headers().contains_key("trace-id"));
    let asc = text(asc).await;
    let desc = text(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/?sort=alphabetical-desc")
                .to_request(),
        )
        .await,
    )
    .await;

    let position = |body: &str, name: &str| body.find(name).expect("name listed");
    assert!(position(&asc, "Ann") < position(&asc, "Bob"));
    assert!(position(&asc, "Bob") < position(&asc, "Cid"));
    assert!(position(&desc, "Cid") < position(&desc, "Bob"));
    assert!(position(&desc, "Bob") < position(&desc, "Ann"));
    assert!(asc.contains("01.05.2024 10:00"));
    assert_eq!(ids(&directory), [1, 2, 3]);
}

#[rstest]
#[actix_web::test]
async fn initial_load_is_skipped_once_records_exist() {
    let (_server, directory) = loaded_directory().await;
    let (_other, source) = stub_remote(json!([])).await;

    assert_eq!(directory.load_initial(&source).await, LoadOutcome::Skipped);
    assert_eq!(ids(&directory), [1, 2, 3]);
}

#[rstest]
#[actix_web::test]
async fn failed_fetch_leaves_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let base = Url::parse(&server.uri()).expect("mock server URL");
    let source = RemoteUsersHttpSource::new(&base, Duration::from_secs(5)).expect("client");
    let directory = empty_directory();

    assert!(source.fetch_all().await.is_err());
    assert!(matches!(
        directory.load_initial(&source).await,
        LoadOutcome::Failed(_)
    ));

    let app = roster_app!(directory).await;
    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("No users yet."));
}

#[rstest]
#[actix_web::test]
async fn created_user_gets_next_id_and_detail_page() {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_form(vec![
                ("id", "0"),
                ("name", "Dee"),
                ("surname", "Park"),
                ("email", "dee@example.com"),
                ("skills", "ops, k8s"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(ids(&directory), [1, 2, 3, 4]);

    let detail =
        test::call_service(&app, test::TestRequest::get().uri("/user/4").to_request()).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = text(detail).await;
    assert!(body.contains("dee@example.com"));
    assert!(body.contains("ops, k8s"));
}

#[rstest]
#[actix_web::test]
async fn editing_keeps_id_and_registration_date() {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;
    let id = UserId::new(2).expect("id");
    let before = directory.store().find(id).expect("Ann");

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_form(vec![
                ("id", "2"),
                ("name", "Anna"),
                ("surname", "Lee"),
                ("email", "anna@example.com"),
            ])
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let after = directory.store().find(id).expect("still present");
    assert_eq!(after.name(), "Anna");
    assert_eq!(after.date(), before.date());
    assert_eq!(ids(&directory), [1, 2, 3]);
}

#[rstest]
#[actix_web::test]
async fn invalid_email_is_rejected_without_changes() {
    let (_server, directory) = loaded_directory().await;
    let before = directory.store().snapshot();
    let app = roster_app!(directory).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users")
            .set_form(vec![("name", "X"), ("email", "bad-email")])
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(response).await.contains("invalid email format"));
    assert_eq!(directory.store().snapshot(), before);
}

#[rstest]
#[actix_web::test]
async fn delete_by_unknown_id_alerts_and_keeps_collection() {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/delete-by-id")
            .set_form(vec![("id", "999")])
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = text(response).await;
    assert!(body.contains("user with this id was not found"));
    assert!(body.contains(r#"id="delete-id" name="id" value="""#));
    assert_eq!(ids(&directory), [1, 2, 3]);
}

#[rstest]
#[actix_web::test]
async fn row_delete_is_idempotent() {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;

    for _ in 0..2 {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users/2/delete")
                .set_form(vec![("sort", "")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    assert_eq!(ids(&directory), [1, 3]);
}

#[rstest]
#[case("/user/42")]
#[case("/user/abc")]
#[actix_web::test]
async fn detail_for_missing_user_is_not_found(#[case] uri: &str) {
    let (_server, directory) = loaded_directory().await;
    let app = roster_app!(directory).await;

    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await.contains("User not found"));
}

#[rstest]
#[actix_web::test]
async fn probes_report_ready_and_live() {
    let directory = empty_directory();
    let app = roster_app!(directory).await;

    for uri in ["/health/ready", "/health/live"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

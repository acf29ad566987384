//! Tests for course module HTTP handlers.

use super::*;
use crate::inbound::http::test_utils::{MockPorts, body_text};
use crate::inbound::http::validation::json_config;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    mocks: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::from(mocks)))
        .app_data(json_config())
        .service(web::scope("/api/v1").configure(configure))
}

fn stored(id: i64, position: i32) -> CourseModule {
    let mut draft = CourseModuleDraft::new(CourseId::new(1), format!("Module {id}"));
    draft.position = position;
    draft.duration_minutes = Some(30);
    CourseModule::new(CourseModuleId::new(id), draft)
}

#[rstest]
#[actix_web::test]
async fn create_maps_order_to_position() {
    let mut mocks = MockPorts::default();
    mocks
        .modules
        .expect_create_module()
        .withf(|draft| draft.position == 3 && draft.duration_minutes == Some(45))
        .times(1)
        .return_once(|draft| Ok(CourseModule::new(CourseModuleId::new(8), draft)));
    let app = actix_test::init_service(test_app(mocks)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/modules")
            .set_json(json!({
                "courseId": 1,
                "title": "Beans",
                "videoUrl": "https://example.com/beans.mp4",
                "order": 3,
                "duration": 45
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], 8);
    assert_eq!(body["order"], 3);
    assert_eq!(body["videoUrl"], "https://example.com/beans.mp4");
}

#[rstest]
#[actix_web::test]
async fn blank_title_is_rejected() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/modules")
            .set_json(json!({"courseId": 1, "title": "  "}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "title");
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_module_is_plain_text_404() {
    let mut mocks = MockPorts::default();
    mocks
        .modules
        .expect_update_module()
        .withf(|id, _| *id == CourseModuleId::new(77))
        .return_once(|_, _| Err(Error::not_found("Module not found with ID: 77")));
    let app = actix_test::init_service(test_app(mocks)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/modules/77")
            .set_json(json!({"courseId": 1, "title": "Beans"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(res).await, "Module not found with ID: 77");
}

#[rstest]
#[case("", ModuleOrder::Id)]
#[case("?orderBy=position", ModuleOrder::Position)]
#[case("?orderBy=DURATION", ModuleOrder::DurationDesc)]
#[actix_web::test]
async fn course_listing_honours_order(#[case] query: &str, #[case] order: ModuleOrder) {
    let mut mocks = MockPorts::default();
    mocks
        .modules_query
        .expect_find_modules()
        .with(eq(CourseModuleFilter::Course {
            course_id: CourseId::new(1),
            order,
        }))
        .times(1)
        .return_once(|_| Ok(vec![stored(1, 0), stored(2, 1)]));
    let app = actix_test::init_service(test_app(mocks)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/modules/course/1{query}"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<ModuleResponseBody> = actix_test::read_body_json(res).await;
    assert_eq!(body.len(), 2);
}

#[rstest]
#[actix_web::test]
async fn unknown_order_is_rejected() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/modules/course/1?orderBy=title")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_order");
}

#[rstest]
#[actix_web::test]
async fn search_is_routed_before_the_id_segment() {
    let mut mocks = MockPorts::default();
    mocks
        .modules_query
        .expect_find_modules()
        .with(eq(CourseModuleFilter::Keywords {
            first: "beans".to_owned(),
            second: String::new(),
        }))
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(mocks)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/modules/search?keyword1=beans")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<ModuleResponseBody> = actix_test::read_body_json(res).await;
    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/modules/abc").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::{bearer, call_json, signup, test_state, SECRET};
use taskdash::auth::TokenService;
use taskdash::models::Task;

#[test_log::test(actix_rt::test)]
async fn test_task_lifecycle_scenario() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;
    let bob = signup(&app, "Bob", "bob@x.com", "pw456").await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "Buy milk" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.status, "Pending");
    assert_eq!(created.owner_id, ann.user_id);

    // Complete
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "status": "Completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.status, "Completed");

    // Someone else cannot delete it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&bob.token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    // The owner can
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&ann.token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Task deleted successfully" })
    );

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(tasks.is_empty());
}

#[actix_rt::test]
async fn test_partial_updates_leave_other_fields_alone() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "Write report" }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "status": "Completed" }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(task.title, "Write report");
    assert_eq!(task.status, "Completed");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "x" }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(task.title, "x");
    assert_eq!(task.status, "Completed");

    // Empty fields count as absent.
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "", "status": "" }))
        .to_request();
    let unchanged: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(unchanged, task);
}

#[actix_rt::test]
async fn test_task_ownership_and_authorization() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;
    let bob = signup(&app, "Bob", "bob@x.com", "pw456").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "Ann's task" }))
        .to_request();
    let ann_task: Task = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&bob.token))
        .set_json(json!({ "title": "Bob's task" }))
        .to_request();
    let bob_task: Task = test::call_and_read_body_json(&app, req).await;

    // Bob only lists his own task
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&bob.token))
        .to_request();
    let bob_tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bob_tasks, vec![bob_task]);

    // Bob cannot update Ann's task
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", ann_task.id))
        .insert_header(bearer(&bob.token))
        .set_json(json!({ "title": "Hijacked", "status": "Completed" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    // Bob cannot delete Ann's task
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", ann_task.id))
        .insert_header(bearer(&bob.token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ann's task is unchanged
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .to_request();
    let ann_tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ann_tasks, vec![ann_task]);
}

#[actix_rt::test]
async fn test_titles_are_stored_as_sent() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": " Buy milk " }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(task.title, " Buy milk ");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task.id))
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "Buy oat milk  " }))
        .to_request();
    let task: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(task.title, "Buy oat milk  ");
}

#[actix_rt::test]
async fn test_create_task_requires_title() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;

    for payload in [json!({}), json!({ "title": "" }), json!({ "title": "   " })] {
        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(bearer(&ann.token))
            .set_json(&payload)
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["message"], "Task title is required");
    }
}

#[actix_rt::test]
async fn test_unknown_task_ids_are_not_found() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;
    let unknown = format!("/api/tasks/{}", Uuid::new_v4());

    let req = test::TestRequest::put()
        .uri(&unknown)
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "status": "Completed" }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&unknown)
        .insert_header(bearer(&ann.token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/api/tasks/not-a-uuid")
        .insert_header(bearer(&ann.token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");
}

#[actix_rt::test]
async fn test_task_routes_reject_bad_tokens() {
    let app = init_app!(test_state());
    let ann = signup(&app, "Ann", "ann@x.com", "pw123").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(&ann.token))
        .set_json(json!({ "title": "Secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Access Denied" }));

    let expired = TokenService::with_ttl(SECRET, Duration::hours(-2))
        .issue(ann.user_id, "ann@x.com")
        .unwrap();
    for token in [expired.as_str(), "not.a.token"] {
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header(bearer(token))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "Invalid Token" }));
    }
}

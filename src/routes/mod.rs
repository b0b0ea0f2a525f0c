pub mod analytics;
pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::error::AppError;

/// Registers every `/api` route. Mount it under a scope wrapped by
/// `AuthMiddleware`; `AppState` must be registered as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login)
                .service(auth::profile),
        )
        .service(web::scope("/users").service(users::complete_onboarding))
        .service(analytics::analytics)
        .service(analytics::summary)
        .service(
            web::scope("/tasks")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Unparsable JSON bodies become 400 with the usual `{message}` body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidArgument(format!("Invalid request body: {}", err)).into()
    })
}

/// A path id that is not a valid UUID cannot name an existing task.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Task not found".into()).into())
}

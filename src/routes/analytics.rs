use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{analytics::summarize, AnalyticsSnapshot, SummaryRequest, SummaryResponse},
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Dashboard metrics. Static for now.
#[get("/analytics")]
pub async fn analytics(_caller: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(AnalyticsSnapshot::mock())
}

/// Turns a metrics snapshot into a one-line summary.
///
/// `data` may be any JSON; only a missing or falsy value is rejected.
#[post("/summary")]
pub async fn summary(
    _caller: AuthenticatedUser,
    request: web::Json<SummaryRequest>,
) -> Result<impl Responder, AppError> {
    let summary = request
        .data
        .as_ref()
        .and_then(summarize)
        .ok_or_else(|| AppError::InvalidArgument("No analytics data provided".into()))?;

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}

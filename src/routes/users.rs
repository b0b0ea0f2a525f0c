use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Acknowledgement, OnboardingRequest},
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Saves the caller's onboarding answers.
///
/// Sets `role` and `industry` and marks onboarding complete. Calling it again
/// overwrites the earlier answers.
///
/// ## Responses:
/// - `200 OK`: `{success: true, message}`.
/// - `404 Not Found`: The token's user no longer exists.
#[post("/onboarding")]
pub async fn complete_onboarding(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    onboarding: web::Json<OnboardingRequest>,
) -> Result<impl Responder, AppError> {
    onboarding.validate()?;

    let user = state
        .store
        .update(caller.id, onboarding.into_inner().into())
        .await?
        .ok_or(AppError::UserNotFound)?;

    log::info!(
        "User {} completed onboarding (role: {:?}, industry: {:?})",
        user.id,
        user.role,
        user.industry
    );

    Ok(HttpResponse::Ok().json(Acknowledgement::ok("Onboarding completed successfully!")))
}

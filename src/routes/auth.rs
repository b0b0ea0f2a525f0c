use crate::{
    auth::{hash_password, verify_password, AuthResponse, AuthenticatedUser, LoginRequest, SignupRequest},
    error::AppError,
    models::{NewUser, ProfileResponse},
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Sign up a new user
///
/// Creates an account that has not completed onboarding yet and returns a
/// token for it. An already registered email is rejected with 400.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let SignupRequest {
        name,
        email,
        password,
    } = signup_data.into_inner();

    if state.store.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let cost = state.hash_cost;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    // The store re-checks uniqueness, covering two signups racing past the lookup above.
    let user = state
        .store
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    let token = state.tokens.issue(user.id, &user.email)?;
    log::info!("User {} signed up", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        user_id: user.id,
        token,
    }))
}

/// Login user
///
/// Unknown email answers 404, a wrong password 401.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let LoginRequest { email, password } = login_data.into_inner();

    let user = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let password_hash = user.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &password_hash)).await??;
    if !matches {
        log::debug!("Failed login for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, &user.email)?;
    log::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        user_id: user.id,
        token,
    }))
}

/// Profile of the token's user.
#[get("/profile")]
pub async fn profile(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = state
        .store
        .find_by_id(caller.id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

//! Cafe directory routes

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    accounts,
    error::{AppError, AppResult},
    forms::{CafeForm, DeletionChoice, DeletionForm, FieldErrors, LoginForm, RegisterForm},
    middleware::{Principal, require_admin, require_auth},
    state::AppState,
    views::{self, ViewContext},
};

/// Create the router for the cafe directory
pub fn create_router(state: AppState) -> Router {
    let member_routes = Router::new()
        .route("/logout", get(logout))
        .route("/add_cafe", get(add_cafe_page).post(add_cafe))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/edit-post/:id", get(edit_cafe_page).post(edit_cafe))
        .route("/delete/:id", get(delete_cafe_page).post(delete_cafe))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .merge(member_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn context(state: &AppState, principal: &Principal) -> ViewContext {
    ViewContext::new(principal, &state.admins)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Response {
    match common::database::health_check(&state.db_pool).await {
        Ok(_) => Json(json!({
            "status": "ok",
            "service": "cafes"
        }))
        .into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "service": "cafes"
                })),
            )
                .into_response()
        }
    }
}

/// Listing of every cafe
pub async fn home(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Html<String>> {
    let cafes = state.cafe_repository.get_all().await?;
    Ok(views::index(&context(&state, &principal), &cafes))
}

pub async fn register_page(State(state): State<AppState>, principal: Principal) -> Html<String> {
    views::register(
        &context(&state, &principal),
        &RegisterForm::default(),
        &FieldErrors::default(),
    )
}

/// Create an account and log it in
pub async fn register(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let ctx = context(&state, &principal);

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(AppError::ValidationFailed(errors)) => {
            return Ok(views::register(&ctx, &form, &errors).into_response());
        }
        Err(e) => return Err(e),
    };

    match accounts::register(&state.user_repository, &registration).await {
        Ok(user) => {
            let jar = state.session_service.login(jar, user.id)?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        // An existing account is sent to the login page rather than back to the form
        Err(e @ AppError::DuplicateAccount) => {
            let login_form = LoginForm {
                email: registration.email,
                password: String::new(),
            };
            let message = e.to_string();
            let page = views::login(
                &ctx,
                &login_form,
                &FieldErrors::default(),
                Some(message.as_str()),
            );
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn login_page(State(state): State<AppState>, principal: Principal) -> Html<String> {
    views::login(
        &context(&state, &principal),
        &LoginForm::default(),
        &FieldErrors::default(),
        None,
    )
}

/// Check credentials and establish a session
pub async fn login(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let ctx = context(&state, &principal);

    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(AppError::ValidationFailed(errors)) => {
            return Ok(views::login(&ctx, &form, &errors, None).into_response());
        }
        Err(e) => return Err(e),
    };

    match accounts::authenticate(&state.user_repository, &credentials).await {
        Ok(user) => {
            info!("User {} logged in", user.id);
            let jar = state.session_service.login(jar, user.id)?;
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e @ (AppError::UnknownAccount | AppError::InvalidCredentials)) => {
            let message = e.to_string();
            let page = views::login(&ctx, &form, &FieldErrors::default(), Some(message.as_str()));
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Clear the session
pub async fn logout(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(user) = principal.user() {
        info!("User {} logged out", user.id);
    }
    (state.session_service.logout(jar), Redirect::to("/"))
}

pub async fn add_cafe_page(State(state): State<AppState>, principal: Principal) -> Html<String> {
    views::cafe_form(
        &context(&state, &principal),
        "Add a new cafe",
        "/add_cafe",
        &CafeForm::default(),
        &FieldErrors::default(),
    )
}

/// Insert a new cafe
pub async fn add_cafe(
    State(state): State<AppState>,
    principal: Principal,
    Form(form): Form<CafeForm>,
) -> AppResult<Response> {
    let ctx = context(&state, &principal);
    let render = |errors: &FieldErrors| {
        views::cafe_form(&ctx, "Add a new cafe", "/add_cafe", &form, errors).into_response()
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(AppError::ValidationFailed(errors)) => return Ok(render(&errors)),
        Err(e) => return Err(e),
    };

    match state.cafe_repository.create(&fields).await {
        Ok(cafe) => {
            info!("Cafe {} added", cafe.id);
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => match AppError::from_cafe_write(e, &fields.name) {
            err @ AppError::DuplicateName(_) => Ok(render(&name_taken(&err))),
            err => Err(err),
        },
    }
}

fn name_taken(err: &AppError) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.add("name", err.to_string());
    errors
}

fn edit_action(id: i64) -> String {
    format!("/edit-post/{}", id)
}

/// Edit form pre-populated with the stored values
pub async fn edit_cafe_page(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let cafe = state
        .cafe_repository
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    Ok(views::cafe_form(
        &context(&state, &principal),
        "Edit cafe",
        &edit_action(id),
        &CafeForm::from_cafe(&cafe),
        &FieldErrors::default(),
    ))
}

/// Replace every field of a cafe
pub async fn edit_cafe(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Form(form): Form<CafeForm>,
) -> AppResult<Response> {
    if state.cafe_repository.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(id));
    }

    let ctx = context(&state, &principal);
    let action = edit_action(id);
    let render = |errors: &FieldErrors| {
        views::cafe_form(&ctx, "Edit cafe", &action, &form, errors).into_response()
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(AppError::ValidationFailed(errors)) => return Ok(render(&errors)),
        Err(e) => return Err(e),
    };

    match state.cafe_repository.update(id, &fields).await {
        Ok(Some(cafe)) => {
            info!("Cafe {} edited", cafe.id);
            Ok(Redirect::to("/").into_response())
        }
        // Deleted between the existence check and the update
        Ok(None) => Err(AppError::NotFound(id)),
        Err(e) => match AppError::from_cafe_write(e, &fields.name) {
            err @ AppError::DuplicateName(_) => Ok(render(&name_taken(&err))),
            err => Err(err),
        },
    }
}

/// Ask before deleting
pub async fn delete_cafe_page(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let cafe = state
        .cafe_repository
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    Ok(views::deletion_confirmation(&context(&state, &principal), &cafe))
}

/// Delete or cancel, depending on the button pressed
pub async fn delete_cafe(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Form(form): Form<DeletionForm>,
) -> AppResult<Response> {
    let cafe = state
        .cafe_repository
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    match form.choice() {
        DeletionChoice::Cancel => Ok(Redirect::to("/").into_response()),
        DeletionChoice::Delete => {
            // Deleted between the lookup and now
            if !state.cafe_repository.delete(cafe.id).await? {
                return Err(AppError::NotFound(id));
            }
            info!("Cafe {} deleted", cafe.id);
            Ok(Redirect::to("/").into_response())
        }
        DeletionChoice::Undecided => {
            Ok(views::deletion_confirmation(&context(&state, &principal), &cafe).into_response())
        }
    }
}

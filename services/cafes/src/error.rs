//! Custom error types for the cafe directory

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use common::error::DatabaseError;
use thiserror::Error;
use tracing::error;

use crate::{forms::FieldErrors, views};

/// Message shown on every 403 page
pub const FORBIDDEN_MESSAGE: &str = "You are not authorized to view this page.";

/// Every failure a request can end in
#[derive(Error, Debug)]
pub enum AppError {
    /// Submitted form fields were rejected
    #[error("Please correct the highlighted fields")]
    ValidationFailed(FieldErrors),

    #[error("You already have signed up with that email, log in instead.")]
    DuplicateAccount,

    #[error("No user with that email exists.")]
    UnknownAccount,

    #[error("Invalid Password")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("{}", FORBIDDEN_MESSAGE)]
    Forbidden,

    #[error("Cafe {0} does not exist.")]
    NotFound(i64),

    #[error("A cafe called \"{0}\" is already listed.")]
    DuplicateName(String),

    /// Storage fault
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map a failed cafe write, turning a name collision into `DuplicateName`
    pub fn from_cafe_write(err: DatabaseError, name: &str) -> Self {
        if err.is_unique_violation() {
            AppError::DuplicateName(name.to_string())
        } else {
            AppError::Database(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::AuthenticationRequired => {
                return Redirect::to("/login").into_response();
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed(_)
            | AppError::DuplicateAccount
            | AppError::UnknownAccount
            | AppError::InvalidCredentials
            | AppError::DuplicateName(_) => StatusCode::BAD_REQUEST,
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                error!("Internal error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Something went wrong on our side. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, views::error_page(status, &message)).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

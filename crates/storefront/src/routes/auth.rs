//! Authentication route handlers.
//!
//! Email and password sign-in, registration, and logout. The session keeps
//! its cart across sign-in and sign-out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::layout::Layout;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::services::notifications::{self, Notification};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub email: String,
    pub error: Option<String>,
}

/// Put the user in the session and go to the account page.
async fn sign_in(session: &Session, layout: Layout, user: User, welcome: Notification) -> Response {
    let current = CurrentUser {
        id: user.id,
        email: user.email,
    };

    if let Err(e) = set_current_user(session, &current).await {
        tracing::error!(error = %e, "Failed to set session");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            LoginTemplate {
                layout,
                email: current.email.to_string(),
                error: Some("Something went wrong. Please try again.".to_string()),
            },
        )
            .into_response();
    }

    set_sentry_user(&current.id, Some(current.email.as_str()));
    layout.keep_notifications(session).await;
    notifications::push_or_log(session, welcome).await;
    Redirect::to("/account").into_response()
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
        AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
        AuthError::Repository(_) | AuthError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(layout: Layout) -> impl IntoResponse {
    LoginTemplate {
        layout,
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User signed in");
            sign_in(
                &session,
                layout,
                user,
                Notification::success("Welcome back", "You're signed in."),
            )
            .await
        }
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Login failed");
            } else {
                tracing::warn!(error = %e, "Login rejected");
            }
            (
                auth_status(&e),
                LoginTemplate {
                    layout,
                    email: form.email,
                    error: Some(e.user_message()),
                },
            )
                .into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(layout: Layout) -> impl IntoResponse {
    RegisterTemplate {
        layout,
        email: String::new(),
        error: None,
    }
}

/// Handle registration form submission.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return (
            StatusCode::BAD_REQUEST,
            RegisterTemplate {
                layout,
                email: form.email,
                error: Some("Passwords don't match.".to_string()),
            },
        )
            .into_response();
    }

    match AuthService::new(state.pool())
        .register_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            sign_in(
                &session,
                layout,
                user,
                Notification::success("Account created", "Add your delivery details below."),
            )
            .await
        }
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Registration failed");
            } else {
                tracing::warn!(error = %e, "Registration rejected");
            }
            (
                auth_status(&e),
                RegisterTemplate {
                    layout,
                    email: form.email,
                    error: Some(e.user_message()),
                },
            )
                .into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out. The cart stays in the session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();

    notifications::push_or_log(&session, Notification::info("Signed out", "See you soon.")).await;
    Redirect::to("/").into_response()
}

//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::Layout;
use crate::db::ProfileRepository;
use crate::middleware::RequireAuth;
use crate::models::{Profile, ProfileUpdate};
use crate::services::notifications::{self, Notification};
use crate::state::AppState;

/// Profile form values for templates.
#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub address: String,
}

impl ProfileView {
    fn from_profile(profile: Profile, fallback_email: &str) -> Self {
        Self {
            email: profile
                .email
                .unwrap_or_else(|| fallback_email.to_string()),
            display_name: profile.display_name.unwrap_or_default(),
            phone: profile.phone.unwrap_or_default(),
            address: profile.address.unwrap_or_default(),
        }
    }

    fn from_update(update: ProfileUpdate, email: &str) -> Self {
        Self {
            email: email.to_string(),
            display_name: update.display_name,
            phone: update.phone,
            address: update.address,
        }
    }
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub layout: Layout,
    pub profile: ProfileView,
}

/// Display the profile form.
///
/// A database failure shows an error notification over an empty form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut layout: Layout,
) -> impl IntoResponse {
    let email = user.email.to_string();

    let profile = match ProfileRepository::new(state.pool()).get(user.id).await {
        Ok(Some(profile)) => ProfileView::from_profile(profile, &email),
        Ok(None) => ProfileView {
            email,
            ..ProfileView::default()
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to load profile");
            layout.notify(Notification::error(
                "Couldn't load your profile",
                "Please try again in a moment.",
            ));
            ProfileView {
                email,
                ..ProfileView::default()
            }
        }
    };

    AccountTemplate { layout, profile }
}

/// Save the profile.
///
/// On failure the stored profile is unchanged and the form re-renders with
/// the submitted values.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    mut layout: Layout,
    Form(form): Form<ProfileUpdate>,
) -> Response {
    match ProfileRepository::new(state.pool()).update(user.id, &form).await {
        Ok(_) => {
            tracing::info!("Profile updated");
            layout.keep_notifications(&session).await;
            notifications::push_or_log(
                &session,
                Notification::success("Profile updated", "Your details have been saved."),
            )
            .await;
            Redirect::to("/account").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update profile");
            layout.notify(Notification::error(
                "Couldn't save your profile",
                "Nothing was changed. Please try again.",
            ));
            let profile = ProfileView::from_update(form, user.email.as_str());
            AccountTemplate { layout, profile }.into_response()
        }
    }
}

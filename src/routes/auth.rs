//! Account routes — registration, sign-in, sign-out, session extraction.
//!
//! ERROR HANDLING
//! ==============
//! Expected failures (duplicate account, bad credentials, mismatched
//! passwords) redirect back to the form with a flash message. Only
//! infrastructure failures surface as 500s.

use axum::Form;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::routes::flash::{self, Flash};
use crate::routes::render;
use crate::services::account::{self, AccountError};
use crate::services::session;
use crate::state::AppState;

const SESSION_COOKIE: &str = "session_token";

/// Browser cookie lifetime, matching the expiry stamped on the session row.
const SESSION_TTL_DAYS: i64 = 7;

const REGISTER_TEMPLATE: &str = include_str!("../../templates/register.html");
const SIGNIN_TEMPLATE: &str = include_str!("../../templates/signin.html");

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require a signed-in visitor; use
/// `Option<AuthUser>` on pages that merely adapt to one.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

async fn lookup_session(
    headers: &axum::http::HeaderMap,
    state: &AppState,
) -> Result<Option<AuthUser>, sqlx::Error> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return Ok(None);
    }

    let user = session::validate_session(&state.pool, token).await?;
    Ok(user.map(|user| AuthUser {
        user,
        token: token.to_owned(),
    }))
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        match lookup_session(&parts.headers, &app_state).await {
            Ok(Some(auth)) => Ok(auth),
            Ok(None) => Err(flash::redirect_with_flash("/signin", Flash::SignInRequired)),
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed");
                Err((StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed").into_response())
            }
        }
    }
}

impl<S> axum::extract::OptionalFromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        match lookup_session(&parts.headers, &app_state).await {
            Ok(auth) => Ok(auth),
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed");
                Ok(None)
            }
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// `GET /register` — registration form.
pub async fn register_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    let page = render::render(REGISTER_TEMPLATE, &[("FLASH", &flash::banner(flash))]);
    (jar, Html(page))
}

#[derive(Deserialize)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

/// `POST /register` — create the account, then send the visitor to sign in.
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.confirm_password {
        return flash::redirect_with_flash("/register", Flash::PasswordMismatch);
    }

    match account::create_user(&state.pool, &form.username, &form.email, &form.password).await {
        Ok(user_id) => {
            tracing::info!(%user_id, "account registered");
            flash::redirect_with_flash("/signin", Flash::AccountCreated)
        }
        Err(AccountError::Duplicate) => {
            flash::redirect_with_flash("/register", Flash::DuplicateAccount)
        }
        Err(
            AccountError::InvalidUsername | AccountError::InvalidEmail | AccountError::EmptyPassword,
        ) => flash::redirect_with_flash("/register", Flash::InvalidForm),
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "registration failed").into_response()
        }
    }
}

// =============================================================================
// SIGN-IN / SIGN-OUT
// =============================================================================

/// `GET /signin` — sign-in form.
pub async fn signin_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    let page = render::render(SIGNIN_TEMPLATE, &[("FLASH", &flash::banner(flash))]);
    (jar, Html(page))
}

#[derive(Deserialize)]
pub struct SigninForm {
    username: String,
    password: String,
}

/// `POST /signin` — check credentials, set the session cookie, go to the
/// dashboard.
pub async fn signin_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SigninForm>,
) -> Response {
    let user = match account::verify_credentials(&state.pool, &form.username, &form.password).await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "credential check failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "sign-in failed").into_response();
        }
    };

    let Some(user) = user else {
        return flash::redirect_with_flash("/signin", Flash::InvalidCredentials);
    };

    let token = match session::create_session(&state.pool, user.id).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "sign-in failed").into_response();
        }
    };

    tracing::info!(user_id = %user.id, "user signed in");

    let jar = jar.add(session_cookie(token)).add(Flash::SignedIn.cookie());
    (jar, Redirect::to("/dashboard")).into_response()
}

/// `GET /logout` — delete the session, clear the cookie, back to the
/// landing page.
pub async fn logout(State(state): State<AppState>, auth: Option<AuthUser>) -> Response {
    if let Some(auth) = &auth {
        let _ = session::delete_session(&state.pool, &auth.token).await;
    }

    let jar = CookieJar::new()
        .add(clear_session_cookie())
        .add(Flash::SignedOut.cookie());
    (jar, Redirect::to("/")).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

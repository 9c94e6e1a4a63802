//! One-shot flash messages.
//!
//! DESIGN
//! ======
//! A flash is a short stable code stored in its own cookie and resolved
//! against a server-side catalog on the next page render, where the cookie
//! is cleared. Only catalog codes ever cross the wire, so a tampered cookie
//! can at worst select a different canned message.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::routes::auth::cookie_secure;

const FLASH_COOKIE: &str = "flash";

/// Catalog of every message the app can flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    AccountCreated,
    DuplicateAccount,
    PasswordMismatch,
    InvalidForm,
    InvalidCredentials,
    SignedIn,
    SignedOut,
    SignInRequired,
}

impl Flash {
    /// Stable code stored in the cookie.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::AccountCreated => "account-created",
            Self::DuplicateAccount => "duplicate-account",
            Self::PasswordMismatch => "password-mismatch",
            Self::InvalidForm => "invalid-form",
            Self::InvalidCredentials => "invalid-credentials",
            Self::SignedIn => "signed-in",
            Self::SignedOut => "signed-out",
            Self::SignInRequired => "signin-required",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "account-created" => Some(Self::AccountCreated),
            "duplicate-account" => Some(Self::DuplicateAccount),
            "password-mismatch" => Some(Self::PasswordMismatch),
            "invalid-form" => Some(Self::InvalidForm),
            "invalid-credentials" => Some(Self::InvalidCredentials),
            "signed-in" => Some(Self::SignedIn),
            "signed-out" => Some(Self::SignedOut),
            "signin-required" => Some(Self::SignInRequired),
            _ => None,
        }
    }

    /// Severity class rendered into the banner's CSS class.
    #[must_use]
    pub fn level(self) -> &'static str {
        match self {
            Self::AccountCreated | Self::SignedIn => "success",
            Self::DuplicateAccount
            | Self::PasswordMismatch
            | Self::InvalidForm
            | Self::InvalidCredentials => "danger",
            Self::SignInRequired => "warning",
            Self::SignedOut => "info",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AccountCreated => "Account created successfully. Please sign in.",
            Self::DuplicateAccount => "Username or email already exists.",
            Self::PasswordMismatch => "Passwords do not match.",
            Self::InvalidForm => "Please fill in every field correctly.",
            Self::InvalidCredentials => "Invalid username or password.",
            Self::SignedIn => "Signed in successfully.",
            Self::SignedOut => "You have been logged out.",
            Self::SignInRequired => "Please sign in to access the dashboard.",
        }
    }

    pub(crate) fn cookie(self) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE, self.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(cookie_secure())
            .build()
    }
}

fn clear_cookie() -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

/// Pull the pending flash out of the jar, clearing its cookie so the
/// message shows exactly once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = Flash::from_code(cookie.value());
    (jar.add(clear_cookie()), flash)
}

/// Render the flash banner, or nothing when no message is pending.
#[must_use]
pub fn banner(flash: Option<Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.level(),
            flash.message()
        ),
        None => String::new(),
    }
}

/// Redirect and queue a flash for the destination page.
pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    let jar = CookieJar::new().add(flash.cookie());
    (jar, Redirect::to(to)).into_response()
}

#[cfg(test)]
#[path = "flash_test.rs"]
mod tests;

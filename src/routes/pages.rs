//! Landing page.

use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::routes::auth::AuthUser;
use crate::routes::{flash, render};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// `GET /` — landing page; signed-in visitors go straight to the dashboard.
pub async fn home(auth: Option<AuthUser>, jar: CookieJar) -> Response {
    if auth.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    let (jar, flash) = flash::take(jar);
    let page = render::render(INDEX_TEMPLATE, &[("FLASH", &flash::banner(flash))]);
    (jar, Html(page)).into_response()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;

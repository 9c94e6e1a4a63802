//! Dashboard — course and scholarship listing with search, filtering, and
//! title suggestions.

use std::fmt::Write;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::routes::auth::AuthUser;
use crate::routes::{flash, render};
use crate::services::catalog::{self, Course, PriceFilter, Scholarship};
use crate::state::AppState;

const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    filter: String,
}

/// `GET|POST /dashboard` — the signed-in listing page. Search and filter
/// arrive in the query string for both methods, so results stay linkable.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    Query(params): Query<DashboardQuery>,
) -> Response {
    let filter = PriceFilter::parse(&params.filter);

    let courses =
        match catalog::search_courses(&state.pool, catalog::DEFAULT_REGION, &params.q, filter)
            .await
        {
            Ok(courses) => courses,
            Err(e) => {
                tracing::error!(error = %e, "course query failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, "dashboard unavailable")
                    .into_response();
            }
        };

    let scholarships = match catalog::list_scholarships(
        &state.pool,
        catalog::DEFAULT_REGION,
        catalog::SCHOLARSHIP_LIMIT,
    )
    .await
    {
        Ok(scholarships) => scholarships,
        Err(e) => {
            tracing::error!(error = %e, "scholarship query failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "dashboard unavailable").into_response();
        }
    };

    let (jar, flash) = flash::take(jar);
    let page = render::render(
        DASHBOARD_TEMPLATE,
        &[
            ("FLASH", &flash::banner(flash)),
            ("USERNAME", &render::escape_html(&auth.user.username)),
            ("QUERY", &render::escape_html(params.q.trim())),
            ("ALL_SELECTED", selected(filter == PriceFilter::All)),
            ("FREE_SELECTED", selected(filter == PriceFilter::Free)),
            ("PAID_SELECTED", selected(filter == PriceFilter::Paid)),
            ("COURSE_ROWS", &course_rows(&courses)),
            ("SCHOLARSHIP_CARDS", &scholarship_cards(&scholarships)),
        ],
    );
    (jar, Html(page)).into_response()
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

fn course_rows(courses: &[Course]) -> String {
    if courses.is_empty() {
        return r#"<tr><td colspan="5" class="empty">No courses match your search.</td></tr>"#
            .to_owned();
    }

    let mut rows = String::new();
    for course in courses {
        let title = render::escape_html(&course.title);
        let link = match course.url.as_deref() {
            Some(url) => format!(
                r#"<a href="{}" target="_blank" rel="noopener">{title}</a>"#,
                render::escape_html(url)
            ),
            None => title,
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            link,
            render::escape_html(course.provider.as_deref().unwrap_or("-")),
            render::escape_html(course.rating.as_deref().unwrap_or("-")),
            render::escape_html(course.price.as_deref().unwrap_or("-")),
            render::escape_html(course.tags.as_deref().unwrap_or("")),
        );
    }
    rows
}

fn scholarship_cards(scholarships: &[Scholarship]) -> String {
    if scholarships.is_empty() {
        return r#"<p class="empty">No scholarships listed right now.</p>"#.to_owned();
    }

    let mut cards = String::new();
    for scholarship in scholarships {
        let title = render::escape_html(&scholarship.title);
        let heading = match scholarship.url.as_deref() {
            Some(url) => format!(
                r#"<a href="{}" target="_blank" rel="noopener">{title}</a>"#,
                render::escape_html(url)
            ),
            None => title,
        };
        let _ = write!(
            cards,
            r#"<div class="card"><h3>{}</h3><p class="provider">{}</p><p>Eligibility: {}</p><p>Deadline: {}</p><p class="tags">{}</p></div>"#,
            heading,
            render::escape_html(scholarship.provider.as_deref().unwrap_or("-")),
            render::escape_html(scholarship.eligibility.as_deref().unwrap_or("-")),
            render::escape_html(scholarship.deadline.as_deref().unwrap_or("-")),
            render::escape_html(scholarship.tags.as_deref().unwrap_or("")),
        );
    }
    cards
}

// =============================================================================
// SUGGESTIONS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// `GET /suggest` — course title suggestions for the search box.
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<Vec<String>>, StatusCode> {
    catalog::suggest_titles(&state.pool, &params.q)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, "suggestion query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

//! Course and scholarship catalog — seeding, search, and filtering.
//!
//! DESIGN
//! ======
//! The catalog is read-mostly: rows are seeded once at startup and only
//! queried afterwards. Search is a case-insensitive substring match on
//! title or tags (SQLite `LIKE` is case-insensitive for ASCII), and the
//! price filter partitions rows on whether the free-text price column
//! mentions "free".

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

/// Region the dashboard is scoped to. Seeded rows default to it.
pub const DEFAULT_REGION: &str = "India";

/// Maximum scholarships shown on the dashboard.
pub const SCHOLARSHIP_LIMIT: i64 = 6;

const SUGGESTION_LIMIT: i64 = 8;

// =============================================================================
// TYPES
// =============================================================================

/// Price partition requested via the dashboard `filter` query param.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFilter {
    All,
    Free,
    Paid,
}

impl PriceFilter {
    /// Parse the query-param form; anything unrecognized means `All`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "paid" => Self::Paid,
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

/// Row from the `courses` table.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub provider: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
    pub tags: Option<String>,
    pub region: String,
}

/// Row from the `scholarships` table.
#[derive(Debug, Clone)]
pub struct Scholarship {
    pub id: i64,
    pub title: String,
    pub provider: Option<String>,
    pub eligibility: Option<String>,
    pub deadline: Option<String>,
    pub url: Option<String>,
    pub tags: Option<String>,
    pub region: String,
}

// =============================================================================
// SEEDING
// =============================================================================

const SEED_COURSES: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Python for Data Science",
        "Coursera",
        "4.8",
        "Free",
        "https://www.coursera.org/learn/python-for-data-science",
        "AI, Data Science",
    ),
    (
        "AI & Machine Learning Bootcamp",
        "Udemy",
        "4.6",
        "₹499",
        "https://www.udemy.com/course/ai-and-machine-learning-bootcamp",
        "AI, ML",
    ),
    (
        "Full Stack Web Development",
        "edX",
        "4.7",
        "Free",
        "https://www.edx.org/learn/web-development",
        "Web Development",
    ),
];

const SEED_SCHOLARSHIPS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Central Sector Scholarship",
        "Govt. of India",
        "UG Students",
        "31-12-2024",
        "https://scholarships.gov.in",
        "Government, India",
    ),
    (
        "Tata Trust Scholarship",
        "Tata Trust",
        "Engineering UG",
        "30-09-2024",
        "https://www.tatatrusts.org",
        "Private, India",
    ),
    (
        "Sahu Jain Trust Scholarship",
        "Sahu Jain Trust",
        "UG & PG Students",
        "15-08-2024",
        "http://sahujaintrust.timesofindia.com/",
        "Private, India",
    ),
];

/// Insert the sample catalog on an empty database. A no-op once either
/// table has rows, so restarts never duplicate the data.
///
/// # Errors
///
/// Returns a database error if the counts or inserts fail.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;
    let scholarships: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scholarships")
        .fetch_one(pool)
        .await?;
    if courses > 0 || scholarships > 0 {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for (title, provider, rating, price, url, tags) in SEED_COURSES {
        sqlx::query("INSERT INTO courses (title, provider, rating, price, url, tags) VALUES (?, ?, ?, ?, ?, ?)")
            .bind(title)
            .bind(provider)
            .bind(rating)
            .bind(price)
            .bind(url)
            .bind(tags)
            .execute(&mut *tx)
            .await?;
    }

    for (title, provider, eligibility, deadline, url, tags) in SEED_SCHOLARSHIPS {
        sqlx::query(
            "INSERT INTO scholarships (title, provider, eligibility, deadline, url, tags) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(provider)
        .bind(eligibility)
        .bind(deadline)
        .bind(url)
        .bind(tags)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        courses = SEED_COURSES.len(),
        scholarships = SEED_SCHOLARSHIPS.len(),
        "seeded catalog with sample data"
    );
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

/// List courses in a region, narrowed by a substring search over title and
/// tags and partitioned by the price filter.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn search_courses(
    pool: &SqlitePool,
    region: &str,
    query: &str,
    filter: PriceFilter,
) -> Result<Vec<Course>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, title, provider, rating, price, url, tags, region FROM courses WHERE region = ",
    );
    builder.push_bind(region);

    let query = query.trim();
    if !query.is_empty() {
        builder.push(" AND (title LIKE '%' || ");
        builder.push_bind(query);
        builder.push(" || '%' OR tags LIKE '%' || ");
        builder.push_bind(query);
        builder.push(" || '%')");
    }

    // A NULL price falls out of both branches.
    match filter {
        PriceFilter::All => {}
        PriceFilter::Free => {
            builder.push(" AND price LIKE '%free%'");
        }
        PriceFilter::Paid => {
            builder.push(" AND price NOT LIKE '%free%'");
        }
    }

    builder.push(" ORDER BY id ASC");

    let rows = builder
        .build_query_as::<(
            i64,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
            String,
        )>()
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, title, provider, rating, price, url, tags, region)| Course {
            id,
            title,
            provider,
            rating,
            price,
            url,
            tags,
            region,
        })
        .collect())
}

/// List up to `limit` scholarships in a region.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_scholarships(
    pool: &SqlitePool,
    region: &str,
    limit: i64,
) -> Result<Vec<Scholarship>, sqlx::Error> {
    let rows = sqlx::query_as::<
        _,
        (
            i64,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
            String,
        ),
    >(
        "SELECT id, title, provider, eligibility, deadline, url, tags, region \
         FROM scholarships WHERE region = ? ORDER BY id ASC LIMIT ?",
    )
    .bind(region)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, title, provider, eligibility, deadline, url, tags, region)| Scholarship {
            id,
            title,
            provider,
            eligibility,
            deadline,
            url,
            tags,
            region,
        })
        .collect())
}

/// Course titles containing the query, deduplicated and capped, for the
/// search box's suggestion dropdown. Blank queries suggest nothing.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn suggest_titles(pool: &SqlitePool, query: &str) -> Result<Vec<String>, sqlx::Error> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT title FROM courses WHERE title LIKE '%' || ? || '%' ORDER BY title ASC LIMIT ?",
    )
    .bind(query)
    .bind(SUGGESTION_LIMIT)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

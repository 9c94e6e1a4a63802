//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on form handling, cookies, and redirects.

pub mod account;
pub mod catalog;
pub mod session;

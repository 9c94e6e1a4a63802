use super::*;
use axum::http::{StatusCode, header};

const ALL: [Flash; 8] = [
    Flash::AccountCreated,
    Flash::DuplicateAccount,
    Flash::PasswordMismatch,
    Flash::InvalidForm,
    Flash::InvalidCredentials,
    Flash::SignedIn,
    Flash::SignedOut,
    Flash::SignInRequired,
];

// =============================================================================
// code / from_code
// =============================================================================

#[test]
fn every_code_round_trips() {
    for flash in ALL {
        assert_eq!(Flash::from_code(flash.code()), Some(flash));
    }
}

#[test]
fn codes_are_unique() {
    for a in ALL {
        for b in ALL {
            if a != b {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}

#[test]
fn from_code_rejects_unknown_codes() {
    assert_eq!(Flash::from_code("made-up"), None);
    assert_eq!(Flash::from_code(""), None);
}

// =============================================================================
// take
// =============================================================================

#[test]
fn take_reads_and_clears_the_cookie() {
    let jar = CookieJar::new().add(Cookie::new("flash", "signed-in"));
    let (jar, flash) = take(jar);
    assert_eq!(flash, Some(Flash::SignedIn));
    assert_eq!(jar.get("flash").map(Cookie::value), Some(""));
}

#[test]
fn take_without_a_cookie_is_none() {
    let (jar, flash) = take(CookieJar::new());
    assert_eq!(flash, None);
    assert!(jar.get("flash").is_none());
}

#[test]
fn take_clears_unrecognized_codes_without_a_message() {
    let jar = CookieJar::new().add(Cookie::new("flash", "garbage"));
    let (jar, flash) = take(jar);
    assert_eq!(flash, None);
    assert_eq!(jar.get("flash").map(Cookie::value), Some(""));
}

// =============================================================================
// banner
// =============================================================================

#[test]
fn banner_renders_level_and_message() {
    let html = banner(Some(Flash::InvalidCredentials));
    assert!(html.contains("flash-danger"));
    assert!(html.contains("Invalid username or password."));
}

#[test]
fn banner_is_empty_without_a_flash() {
    assert_eq!(banner(None), "");
}

// =============================================================================
// redirect_with_flash
// =============================================================================

#[test]
fn redirect_with_flash_sets_cookie_and_location() {
    let response = redirect_with_flash("/signin", Flash::SignInRequired);
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/signin");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("flash=signin-required"));
    assert!(set_cookie.contains("HttpOnly"));
}

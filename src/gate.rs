//! Session-scoped password gate.
//!
//! The gate compares a SHA-256 digest of the submitted password against the
//! configured digest and remembers a successful unlock in a session cookie.
//! The expected digest ships with the page flow, so this is a cosmetic gate,
//! not an access-control mechanism.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use sha2::{Digest, Sha256};

/// Session cookie marking the gate as unlocked.
pub const AUTH_COOKIE: &str = "bbq2026_auth";

/// Cookie value stored on a successful unlock.
pub const AUTH_VALUE: &str = "true";

/// Lowercase SHA-256 hex digest of a password attempt.
pub fn digest_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether a password attempt matches the configured digest.
pub fn verify(input: &str, expected_digest: &str) -> bool {
    digest_hex(input) == expected_digest
}

/// Whether the current session has already unlocked the gate.
pub fn is_unlocked(jar: &CookieJar) -> bool {
    jar.get(AUTH_COOKIE)
        .map(|cookie| cookie.value() == AUTH_VALUE)
        .unwrap_or(false)
}

/// The unlock cookie. No max-age, so it lives for the browser session and
/// the gate re-prompts in a fresh one.
pub fn unlock_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, AUTH_VALUE);
    cookie.set_path("/");
    cookie
}

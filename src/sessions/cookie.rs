use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};
use time::Duration;

pub const SESSION_COOKIE: &str = "wallkeep.sid";

/// Attach the session cookie (HttpOnly, SameSite=Lax, Path=/).
pub fn attach(jar: SignedCookieJar, token: String, ttl: Duration, secure: bool) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(ttl);
    jar.add(cookie)
}

pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Token from a correctly signed cookie; tampered values read as absent.
pub fn token(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_owned())
}

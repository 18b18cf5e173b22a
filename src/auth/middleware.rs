//! Axum extractors for authentication and rate limiting.

use crate::auth::token::{verify_credential, AdminIdentity, AUTH_COOKIE};
use crate::config::Config;
use crate::error::AppError;
use crate::storage::Store;
use axum::extract::ConnectInfo;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Window for the login/admin/contact rate limit scopes (15 minutes).
pub const STRICT_WINDOW: Duration = Duration::from_secs(900);

/// Window for the API-wide rate limit scope (1 minute).
pub const API_WINDOW: Duration = Duration::from_secs(60);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub limiter: RateLimiter,
}

/// Authentication gate for mutating routes.
///
/// Extracts a credential (cookie first, then `Authorization: Bearer`), runs
/// the verification chain and attaches the resulting identity. Rejects with
/// 401 when no credential is present and 403 when the credential is invalid.
/// The admin rate-limit scope is checked before any credential work so that
/// token guessing is bounded too.
pub struct AdminAuth(pub AdminIdentity);

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ip) = client_ip(parts) {
            if !state.limiter.check(
                "admin",
                ip,
                state.config.rate_limit_admin_per_15min,
                STRICT_WINDOW,
            ) {
                tracing::warn!(action = "rate_limited", scope = "admin", "Rate limit exceeded");
                return Err(AppError::RateLimited);
            }
        }

        let credential = extract_credential(parts);
        let identity = verify_credential(credential.as_deref(), &state.config)?;

        Ok(AdminAuth(identity))
    }
}

/// Pull a credential out of the request, if any.
///
/// The `auth_token` cookie takes precedence over the Authorization header;
/// a header without the `Bearer ` prefix counts as absent.
pub(crate) fn extract_credential(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Client IP for rate limiting, available when the server is started with
/// `into_make_service_with_connect_info`.
pub(crate) fn client_ip(parts: &Parts) -> Option<IpAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// In-memory fixed-window rate limiter keyed by (scope, client IP).
///
/// One counter per window: the first request in a window starts it, and the
/// counter resets once the window elapses.
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<(&'static str, IpAddr), Window>>>,
}

struct Window {
    started: Instant,
    count: u32,
}

/// Above this many tracked (scope, ip) pairs, stale windows are pruned on
/// the next check.
const MAX_TRACKED_CLIENTS: usize = 10_000;

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request against `(scope, ip)`.
    ///
    /// Returns true if the request is within `max` for the current window.
    pub fn check(&self, scope: &'static str, ip: IpAddr, max: u32, window: Duration) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if windows.len() > MAX_TRACKED_CLIENTS {
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry((scope, ip)).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extract_credential_from_cookie() {
        let parts = parts_with_headers(&[("cookie", "auth_token=tok123")]);
        assert_eq!(extract_credential(&parts).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_extract_credential_from_bearer_header() {
        let parts = parts_with_headers(&[("authorization", "Bearer tok456")]);
        assert_eq!(extract_credential(&parts).as_deref(), Some("tok456"));
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let parts = parts_with_headers(&[
            ("cookie", "auth_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_credential(&parts).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_non_bearer_header_counts_as_absent() {
        let parts = parts_with_headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_credential(&parts), None);
    }

    #[test]
    fn test_unrelated_cookie_counts_as_absent() {
        let parts = parts_with_headers(&[("cookie", "session=abc; theme=dark")]);
        assert_eq!(extract_credential(&parts), None);
    }

    #[test]
    fn test_rate_limiter_enforces_max() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.check("test", ip, 3, Duration::from_secs(60)));
        }
        // Fourth request in the window is over the limit
        assert!(!limiter.check("test", ip, 3, Duration::from_secs(60)));
    }

    #[test]
    fn test_rate_limiter_window_reset() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.2".parse().unwrap();
        let window = Duration::from_millis(30);

        assert!(limiter.check("reset", ip, 1, window));
        assert!(!limiter.check("reset", ip, 1, window));

        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.check("reset", ip, 1, window));
    }

    #[test]
    fn test_rate_limiter_scopes_are_independent() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.3".parse().unwrap();

        assert!(limiter.check("a", ip, 1, Duration::from_secs(60)));
        assert!(!limiter.check("a", ip, 1, Duration::from_secs(60)));
        // Different scope, same IP: its own counter
        assert!(limiter.check("b", ip, 1, Duration::from_secs(60)));
    }

    #[test]
    fn test_rate_limiter_ips_are_independent() {
        let limiter = RateLimiter::new();
        let ip1: IpAddr = "10.0.0.1".parse().unwrap();
        let ip2: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check("ip", ip1, 1, Duration::from_secs(60)));
        assert!(!limiter.check("ip", ip1, 1, Duration::from_secs(60)));
        assert!(limiter.check("ip", ip2, 1, Duration::from_secs(60)));
    }
}

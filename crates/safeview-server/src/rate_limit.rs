//! Per-IP rate limiting for the public API.
//!
//! Fixed-window counters: each IP gets a budget of requests per minute,
//! reset when its window rolls over. A limit of zero disables the check.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tracing::warn;

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<IpAddr, Window>>>,
    limit: u32,
}

impl RateLimiter {
    /// `limit` requests per IP per minute; 0 disables limiting.
    pub fn new(limit: u32) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            limit,
        }
    }

    /// Record one request from `ip`; returns `false` once the budget for
    /// the current window is spent.
    pub async fn check(&self, ip: IpAddr) -> bool {
        if self.limit == 0 {
            return true;
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= WINDOW {
            window.started = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= self.limit
    }

    /// Drop windows that have been idle longer than `max_idle`.
    pub async fn purge_stale(&self, max_idle: Duration) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        windows.retain(|_, w| now.duration_since(w.started) < max_idle);
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(ip) = client_ip(&req) {
        if !limiter.check(ip).await {
            warn!(ip = %ip, "Rate limit exceeded");
            return Err(StatusCode::TOO_MANY_REQUESTS);
        }
    }

    Ok(next.run(req).await)
}

/// Prefer the socket address, then proxy headers.
fn client_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    if let Some(info) = req.extensions().get::<ConnectInfo<std::net::SocketAddr>>() {
        return Some(info.0.ip());
    }

    let header_ip = |name: &str| -> Option<IpAddr> {
        req.headers()
            .get(name)?
            .to_str()
            .ok()?
            .split(',')
            .next()?
            .trim()
            .parse()
            .ok()
    };

    header_ip("x-forwarded-for").or_else(|| header_ip("x-real-ip"))
}

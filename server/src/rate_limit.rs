use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::json;
use std::collections::VecDeque;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::log_warn;
use crate::routes::AppState;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

const SAVE_SCORE_LIMITS: &[RateLimit] = &[RateLimit::new(30, MINUTE)];
const READ_LIMITS: &[RateLimit] = &[RateLimit::new(60, MINUTE)];
const DEFAULT_LIMITS: &[RateLimit] = &[RateLimit::new(200, DAY), RateLimit::new(50, HOUR)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const fn new(max_requests: usize, window: Duration) -> Self {
        Self { max_requests, window }
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.window.as_secs();
        let (count, unit) = if secs > 0 && secs % DAY.as_secs() == 0 {
            (secs / DAY.as_secs(), "day")
        } else if secs > 0 && secs % HOUR.as_secs() == 0 {
            (secs / HOUR.as_secs(), "hour")
        } else if secs > 0 && secs % MINUTE.as_secs() == 0 {
            (secs / MINUTE.as_secs(), "minute")
        } else {
            (secs, "second")
        };
        let plural = if count == 1 { "" } else { "s" };
        write!(f, "{} per {} {}{}", self.max_requests, count, unit, plural)
    }
}

/// Routes that share a set of limits. Each class keeps its own counters per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    SaveScore,
    Read,
    Other,
}

impl RouteClass {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/save_score" => RouteClass::SaveScore,
            "/top_scores" | "/total_players" => RouteClass::Read,
            _ => RouteClass::Other,
        }
    }

    pub fn limits(self) -> &'static [RateLimit] {
        match self {
            RouteClass::SaveScore => SAVE_SCORE_LIMITS,
            RouteClass::Read => READ_LIMITS,
            RouteClass::Other => DEFAULT_LIMITS,
        }
    }

    fn longest_window(self) -> Duration {
        self.limits().iter().map(|limit| limit.window).max().unwrap_or(Duration::ZERO)
    }
}

/// Sliding-window request counters keyed by client address and route class.
#[derive(Default)]
pub struct RateLimiter {
    hits: DashMap<(IpAddr, RouteClass), VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the request if every limit of `class` still has room, otherwise
    /// returns the first limit that is exhausted. Rejected requests are not counted.
    pub fn check(&self, ip: IpAddr, class: RouteClass, now: Instant) -> Result<(), RateLimit> {
        let mut hits = self.hits.entry((ip, class)).or_default();
        drop_expired(&mut hits, now, class.longest_window());

        for limit in class.limits() {
            let recent = hits
                .iter()
                .rev()
                .take_while(|&&hit| now.duration_since(hit) < limit.window)
                .count();
            if recent >= limit.max_requests {
                return Err(*limit);
            }
        }

        hits.push_back(now);
        Ok(())
    }

    /// Forgets clients whose every hit has left the longest window of its class.
    pub fn prune(&self, now: Instant) {
        self.hits.retain(|(_, class), hits| {
            drop_expired(hits, now, class.longest_window());
            !hits.is_empty()
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }

    pub async fn run_pruning(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;
            self.prune(Instant::now());
        }
    }
}

fn drop_expired(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&oldest) = hits.front() {
        if now.duration_since(oldest) < window {
            break;
        }
        hits.pop_front();
    }
}

/// Answers 429 once the caller's address is over a limit for the requested route.
/// Requests without a known peer address pass through uncounted.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(peer) = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|info| info.0) else {
        return next.run(request).await;
    };

    let class = RouteClass::from_path(request.uri().path());
    if let Err(limit) = state.limiter.check(peer.ip(), class, Instant::now()) {
        log_warn!("Rate limit exceeded by IP: {} on {}", peer.ip(), request.uri().path());
        return too_many_requests(limit);
    }

    next.run(request).await
}

fn too_many_requests(limit: RateLimit) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({ "error": "Too many requests", "message": limit.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const ALICE: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const BOB: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn test_limit_display() {
        assert_eq!(SAVE_SCORE_LIMITS[0].to_string(), "30 per 1 minute");
        assert_eq!(DEFAULT_LIMITS[0].to_string(), "200 per 1 day");
        assert_eq!(DEFAULT_LIMITS[1].to_string(), "50 per 1 hour");
        assert_eq!(RateLimit::new(5, Duration::from_secs(90)).to_string(), "5 per 90 seconds");
    }

    #[test]
    fn test_route_classes() {
        assert_eq!(RouteClass::from_path("/save_score"), RouteClass::SaveScore);
        assert_eq!(RouteClass::from_path("/top_scores"), RouteClass::Read);
        assert_eq!(RouteClass::from_path("/total_players"), RouteClass::Read);
        assert_eq!(RouteClass::from_path("/"), RouteClass::Other);
        assert_eq!(RouteClass::Other.longest_window(), DAY);
    }

    #[test]
    fn test_save_score_limit_per_minute() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        for i in 0..30 {
            assert!(limiter.check(ALICE, RouteClass::SaveScore, start + Duration::from_millis(i)).is_ok());
        }
        let later = start + Duration::from_secs(30);
        assert_eq!(limiter.check(ALICE, RouteClass::SaveScore, later), Err(SAVE_SCORE_LIMITS[0]));

        // Other clients and other route classes keep their own counters.
        assert!(limiter.check(BOB, RouteClass::SaveScore, later).is_ok());
        assert!(limiter.check(ALICE, RouteClass::Read, later).is_ok());

        let next_minute = start + MINUTE + Duration::from_millis(30);
        assert!(limiter.check(ALICE, RouteClass::SaveScore, next_minute).is_ok());
    }

    #[test]
    fn test_rejected_requests_are_not_counted() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        for _ in 0..60 {
            limiter.check(ALICE, RouteClass::Read, start).unwrap();
        }
        for _ in 0..10 {
            assert!(limiter.check(ALICE, RouteClass::Read, start + Duration::from_secs(10)).is_err());
        }
        assert!(limiter.check(ALICE, RouteClass::Read, start + MINUTE).is_ok());
    }

    #[test]
    fn test_hourly_and_daily_defaults() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        for _ in 0..50 {
            limiter.check(ALICE, RouteClass::Other, start).unwrap();
        }
        assert_eq!(limiter.check(ALICE, RouteClass::Other, start), Err(DEFAULT_LIMITS[1]));

        let mut now = start;
        for _ in 0..3 {
            now += HOUR;
            for _ in 0..50 {
                limiter.check(ALICE, RouteClass::Other, now).unwrap();
            }
        }
        now += HOUR;
        assert_eq!(limiter.check(ALICE, RouteClass::Other, now), Err(DEFAULT_LIMITS[0]));
        assert!(limiter.check(ALICE, RouteClass::Other, start + DAY).is_ok());
    }

    #[test]
    fn test_prune_forgets_idle_clients() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        limiter.check(ALICE, RouteClass::SaveScore, start).unwrap();
        limiter.check(BOB, RouteClass::Other, start).unwrap();
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.prune(start + MINUTE);
        assert_eq!(limiter.tracked_clients(), 1);

        limiter.prune(start + DAY);
        assert_eq!(limiter.tracked_clients(), 0);
    }
}

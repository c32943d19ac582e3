//! Inbound rate limiting, keyed by client IP
//!
//! Requests that arrive without peer information (e.g. in-process tests)
//! all share the `0.0.0.0` bucket.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use ivf_common::config::RateLimitConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ApiError;

pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// Build a limiter allowing `max_requests` per `window_secs` for each IP
///
/// The full allowance is available as a burst and refills evenly across
/// the window.
pub fn build_rate_limiter(config: &RateLimitConfig) -> ivf_common::Result<IpRateLimiter> {
    let burst = NonZeroU32::new(config.max_requests).ok_or_else(|| {
        ivf_common::Error::Config("rate_limit.max_requests must be at least 1".to_string())
    })?;
    if config.window_secs == 0 {
        return Err(ivf_common::Error::Config(
            "rate_limit.window_secs must be at least 1".to_string(),
        ));
    }

    let period = Duration::from_secs(config.window_secs) / config.max_requests;
    let quota = Quota::with_period(period)
        .ok_or_else(|| ivf_common::Error::Config("rate limit period is zero".to_string()))?
        .allow_burst(burst);

    Ok(RateLimiter::keyed(quota))
}

/// Periodically drop buckets of clients that are back to a full allowance
///
/// Keyed state otherwise grows by one entry per distinct client IP.
pub fn spawn_pruner(limiter: Arc<IpRateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let before = limiter.len();
            limiter.retain_recent();
            limiter.shrink_to_fit();
            let pruned = before.saturating_sub(limiter.len());
            if pruned > 0 {
                debug!(pruned, remaining = limiter.len(), "Pruned idle rate-limit buckets");
            }
        }
    })
}

fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware rejecting requests over the per-IP allowance with 429
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ip = client_ip(&request);

    if limiter.check_key(&ip).is_err() {
        warn!(client = %ip, path = %request.uri().path(), "Rate limit exceeded");
        return Err(ApiError::TooManyRequests(
            "Too many requests from this IP, please try again later".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_configured_burst() {
        let limiter = build_rate_limiter(&RateLimitConfig {
            max_requests: 3,
            window_secs: 900,
        })
        .unwrap();

        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        for _ in 0..3 {
            assert!(limiter.check_key(&ip).is_ok());
        }
        assert!(limiter.check_key(&ip).is_err());

        // Separate bucket per IP
        let other = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
        assert!(limiter.check_key(&other).is_ok());
    }

    #[tokio::test]
    async fn test_pruner_drops_replenished_buckets() {
        // 10 per second: a single used cell refills in 100ms
        let limiter = Arc::new(
            build_rate_limiter(&RateLimitConfig {
                max_requests: 10,
                window_secs: 1,
            })
            .unwrap(),
        );
        for last in 1..=5u8 {
            let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 0, last));
            assert!(limiter.check_key(&ip).is_ok());
        }
        assert_eq!(limiter.len(), 5);

        let pruner = spawn_pruner(limiter.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(400)).await;
        pruner.abort();

        assert!(limiter.is_empty());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let zero_requests = RateLimitConfig {
            max_requests: 0,
            window_secs: 900,
        };
        assert!(build_rate_limiter(&zero_requests).is_err());

        let zero_window = RateLimitConfig {
            max_requests: 10,
            window_secs: 0,
        };
        assert!(build_rate_limiter(&zero_window).is_err());
    }
}

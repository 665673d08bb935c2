//! API Middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};

/// Thresholds for the slow-request warning
#[derive(Debug, Clone, Copy)]
pub struct SlowRequestThresholds {
    /// Any route other than `/api/analyze`
    pub default: Duration,
    /// `/api/analyze`, which waits on the LLM provider
    pub analysis: Duration,
}

impl SlowRequestThresholds {
    fn for_path(&self, path: &str) -> Duration {
        if path.ends_with("/analyze") {
            self.analysis
        } else {
            self.default
        }
    }
}

/// Request timing middleware
pub async fn timing_middleware(
    State(thresholds): State<SlowRequestThresholds>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let threshold = thresholds.for_path(&path);

    let response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if elapsed_ms > threshold.as_millis() as u64 {
        tracing::warn!(
            %method,
            %path,
            request_id = request_id.as_deref().unwrap_or("-"),
            elapsed_ms,
            threshold_ms = threshold.as_millis() as u64,
            status,
            "Slow request"
        );
    } else {
        tracing::debug!(%method, %path, elapsed_ms, status, "Request completed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_route_uses_its_own_threshold() {
        let thresholds = SlowRequestThresholds {
            default: Duration::from_millis(1000),
            analysis: Duration::from_secs(30),
        };
        assert_eq!(thresholds.for_path("/api/analyze"), Duration::from_secs(30));
        assert_eq!(thresholds.for_path("/api/analyses"), Duration::from_millis(1000));
        assert_eq!(thresholds.for_path("/api/transactions"), Duration::from_millis(1000));
    }
}

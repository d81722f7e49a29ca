//! Prometheus metrics for the referral service.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names.
pub mod names {
    /// Total HTTP requests served.
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    /// HTTP request duration in seconds.
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

    /// Total referral links issued.
    pub const LINKS_ISSUED_TOTAL: &str = "reflink_links_issued_total";
    /// Total redemption attempts, labelled by outcome.
    pub const LINK_REDEMPTIONS_TOTAL: &str = "reflink_link_redemptions_total";

    /// Aggregate cache lookups, labelled by aggregate and result.
    pub const CACHE_LOOKUPS_TOTAL: &str = "reflink_cache_lookups_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::HTTP_REQUESTS_TOTAL,
        "Total number of HTTP requests"
    );
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Duration of HTTP requests"
    );
    describe_counter!(
        names::LINKS_ISSUED_TOTAL,
        "Total number of referral links issued"
    );
    describe_counter!(
        names::LINK_REDEMPTIONS_TOTAL,
        "Total number of link redemption attempts"
    );
    describe_counter!(
        names::CACHE_LOOKUPS_TOTAL,
        "Total number of aggregate cache lookups"
    );
}

/// Outcome of a redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionOutcome {
    Redeemed,
    Exhausted,
    Disabled,
    UnknownToken,
    /// A referral redemption handed back after the registration failed.
    Released,
}

impl RedemptionOutcome {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Redeemed => "redeemed",
            Self::Exhausted => "exhausted",
            Self::Disabled => "disabled",
            Self::UnknownToken => "unknown_token",
            Self::Released => "released",
        }
    }
}

/// Link metrics recorder.
pub struct LinkMetrics;

impl LinkMetrics {
    /// Record a newly issued link.
    pub fn link_issued() {
        counter!(names::LINKS_ISSUED_TOTAL).increment(1);
    }

    /// Record a redemption attempt.
    pub fn redemption(outcome: RedemptionOutcome) {
        counter!(names::LINK_REDEMPTIONS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }
}

/// Cache metrics recorder.
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record an aggregate lookup (`hit`, `miss` or `error`).
    pub fn lookup(aggregate: &'static str, result: &'static str) {
        counter!(
            names::CACHE_LOOKUPS_TOTAL,
            "aggregate" => aggregate,
            "result" => result
        )
        .increment(1);
    }
}

/// HTTP metrics recorder.
pub struct HttpMetrics;

impl HttpMetrics {
    /// Record a completed request.
    pub fn request(path: &str, method: &str, status: u16, duration: Duration) {
        let labels = [
            ("path", path.to_string()),
            ("method", method.to_string()),
            ("status", status.to_string()),
        ];
        counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
        histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration.as_secs_f64());
    }
}

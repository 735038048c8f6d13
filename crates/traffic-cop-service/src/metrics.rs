//! Prometheus metrics for toggle resolution.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;
use traffic_cop_core::ErrorKind;

/// Metric names.
pub mod names {
    /// Resolutions answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "traffic_cop_cache_hits_total";
    /// Resolutions that missed the cache.
    pub const CACHE_MISSES_TOTAL: &str = "traffic_cop_cache_misses_total";
    /// Resolutions answered from the store.
    pub const STORE_FALLBACKS_TOTAL: &str = "traffic_cop_store_fallbacks_total";
    /// Failed resolutions, labelled by error kind.
    pub const RESOLVE_FAILURES_TOTAL: &str = "traffic_cop_resolve_failures_total";
    /// Resolution duration in seconds.
    pub const RESOLVE_DURATION_SECONDS: &str = "traffic_cop_resolve_duration_seconds";

    /// Cache writes completed by the write-back worker.
    pub const WRITE_BACKS_COMPLETED_TOTAL: &str = "traffic_cop_write_backs_completed_total";
    /// Cache writes that failed in the write-back worker.
    pub const WRITE_BACKS_FAILED_TOTAL: &str = "traffic_cop_write_backs_failed_total";
    /// Cache writes dropped because the queue was full or closed.
    pub const WRITE_BACKS_DROPPED_TOTAL: &str = "traffic_cop_write_backs_dropped_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Toggle resolutions served from cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Toggle resolutions that missed the cache");
    describe_counter!(
        names::STORE_FALLBACKS_TOTAL,
        "Toggle resolutions served from the store"
    );
    describe_counter!(
        names::RESOLVE_FAILURES_TOTAL,
        "Failed toggle resolutions by error kind"
    );
    describe_histogram!(
        names::RESOLVE_DURATION_SECONDS,
        "Toggle resolution duration in seconds"
    );
    describe_counter!(
        names::WRITE_BACKS_COMPLETED_TOTAL,
        "Cache write-backs completed"
    );
    describe_counter!(names::WRITE_BACKS_FAILED_TOTAL, "Cache write-backs that failed");
    describe_counter!(
        names::WRITE_BACKS_DROPPED_TOTAL,
        "Cache write-backs dropped before reaching the worker"
    );
}

/// Records a cache hit.
pub fn record_cache_hit() {
    counter!(names::CACHE_HITS_TOTAL).increment(1);
}

/// Records a cache miss.
pub fn record_cache_miss() {
    counter!(names::CACHE_MISSES_TOTAL).increment(1);
}

/// Records a resolution served by the store.
pub fn record_store_fallback() {
    counter!(names::STORE_FALLBACKS_TOTAL).increment(1);
}

/// Records a failed resolution.
pub fn record_resolve_failure(kind: ErrorKind) {
    counter!(names::RESOLVE_FAILURES_TOTAL, "kind" => kind.as_str()).increment(1);
}

/// Records how long a resolution took.
pub fn record_resolve_duration(duration: Duration) {
    histogram!(names::RESOLVE_DURATION_SECONDS).record(duration.as_secs_f64());
}

/// Records a completed write-back.
pub fn record_write_back_completed() {
    counter!(names::WRITE_BACKS_COMPLETED_TOTAL).increment(1);
}

/// Records a failed write-back.
pub fn record_write_back_failed() {
    counter!(names::WRITE_BACKS_FAILED_TOTAL).increment(1);
}

/// Records a dropped write-back.
pub fn record_write_back_dropped() {
    counter!(names::WRITE_BACKS_DROPPED_TOTAL).increment(1);
}

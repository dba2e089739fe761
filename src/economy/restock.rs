//! Restock Scheduler
//!
//! Due-check arithmetic only. The engine runs the check once at startup and
//! whenever the host asks; elapsed periods beyond the first collapse into a
//! single restock, there is no catch-up loop.

/// Milliseconds per day
pub const DAY_MS: i64 = 86_400_000;

/// Whether a restock is due: whole elapsed days since the last restock
/// reached the configured interval.
pub fn is_restock_due(last_restock_ms: i64, interval_days: i64, now_ms: i64) -> bool {
    if interval_days <= 0 {
        return true;
    }
    let elapsed_days = (now_ms - last_restock_ms) / DAY_MS;
    elapsed_days >= interval_days
}

//! Identifier generation
//!
//! Ids keep the familiar time-derived look (`BK-1767225600000`) but come
//! from a strictly increasing tick, so two calls in the same millisecond
//! still get different values.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

#[derive(Debug, Default)]
pub struct TickGenerator {
    last: AtomicI64,
}

impl TickGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `max(now_ms, previous + 1)`
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    pub fn booking_id(&self) -> String {
        format!("BK-{}", self.next())
    }

    pub fn location_id(&self) -> String {
        format!("loc_custom_{}", self.next())
    }

    pub fn session_token(&self) -> String {
        format!("mock-jwt-{}", self.next())
    }

    /// Token for sessions created by the legacy login path
    pub fn legacy_session_token(&self) -> String {
        format!("mock-jwt-token-{}", self.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_ticks_strictly_increase() {
        let ids = TickGenerator::new();
        let mut prev = ids.next();
        for _ in 0..10_000 {
            let next = ids.next();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = Arc::new(TickGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..1000).map(|_| ids.booking_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id generated");
            }
        }
        assert_eq!(seen.len(), 4000);
    }

    #[test]
    fn test_prefixes() {
        let ids = TickGenerator::new();
        assert!(ids.booking_id().starts_with("BK-"));
        assert!(ids.location_id().starts_with("loc_custom_"));
        assert!(ids.session_token().starts_with("mock-jwt-"));
        assert!(ids.legacy_session_token().starts_with("mock-jwt-token-"));
    }
}

//! Shared fixtures for the cross-crate test suites.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::Clock;
use services::BoardService;
use storage_adapters::MemoryThreadRepository;

/// A clock that moves forward one second every time it is read, so every
/// created thread or reply gets a distinct, predictable timestamp.
#[derive(Debug)]
pub struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

/// A service over a fresh in-memory store, returned with the store so tests
/// can inspect persisted state directly.
pub fn memory_service() -> (BoardService, Arc<MemoryThreadRepository>) {
    let repo = Arc::new(MemoryThreadRepository::new());
    let service = BoardService::with_clock(repo.clone(), Arc::new(StepClock::new()));
    (service, repo)
}

#[cfg(feature = "web-axum")]
pub fn test_router() -> axum::Router {
    use api_adapters::http::{create_router, AppState};

    let (service, _) = memory_service();
    create_router(AppState::new(service), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock_advances() {
        let clock = StepClock::new();
        let a = clock.now();
        let b = clock.now();
        assert_eq!(b - a, Duration::seconds(1));
    }
}

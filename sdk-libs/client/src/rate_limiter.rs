use std::{
    fmt::{Debug, Formatter},
    num::NonZeroU32,
    sync::Arc,
};

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota,
};

type Limiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared request budget. Clones draw from the same quota.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Limiter>,
    requests_per_second: u32,
}

impl RateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(Limiter::direct(Quota::per_second(per_second))),
            requests_per_second: per_second.get(),
        }
    }

    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second
    }

    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    pub async fn acquire_with_wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl Debug for RateLimiter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RateLimiter {{ requests_per_second: {} }}",
            self.requests_per_second
        )
    }
}

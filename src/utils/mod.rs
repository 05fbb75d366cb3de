use std::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use took::Timer;

pub mod logging;
pub mod num;

pub type Random = Pcg64Mcg;

pub fn create_seeded_rng(seed: u64) -> Random {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    // discard the first three
    rng.next_u64();
    rng.next_u64();
    rng.next_u64();
    rng
}

pub enum TimeLimit {
    Seconds(f64),
    None,
}

impl TimeLimit {
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            _ => false,
        }
    }
}

pub struct Countdown {
    start: Timer,
    time_limit: TimeLimit,
}

impl Countdown {
    pub fn new(start: Timer, limit: TimeLimit) -> Self {
        Self {
            start,
            time_limit: limit,
        }
    }

    pub fn empty() -> Self {
        Self {
            start: Timer::new(),
            time_limit: TimeLimit::None,
        }
    }

    pub fn is_finished(&self) -> bool {
        if let TimeLimit::Seconds(value) = self.time_limit {
            self.start.took().as_std().as_secs_f64() >= value
        } else {
            false
        }
    }

    pub fn time_elapsed(&self) -> Duration {
        self.start.took().clone().into_std()
    }
}

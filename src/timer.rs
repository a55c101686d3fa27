use std::time::{Duration, Instant};

/// Logs how long a scope took when dropped. Handy around loading and build
/// phases; kernels are timed by the benchmark harness instead.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::info!("[{}] {} msec", self.name, self.elapsed().as_millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotone() {
        let timer = ScopedTimer::new("test");
        let first = timer.elapsed();
        assert!(timer.elapsed() >= first);
    }
}

use std::time::Duration;

/// Blocks the caller between retry attempts.
pub trait Pause: Send + Sync {
    fn pause(&self, duration: Duration);
}

/// Production implementation sleeping on the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

use chrono::{DateTime, Duration, Utc};

/// How long artifacts stay retrievable after creation.
///
/// An artifact is retrievable while its age is below the window and becomes
/// reclaimable once its age exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    window: Duration,
}

impl RetentionPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn expires_at(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + self.window
    }

    pub fn is_retrievable(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at < self.window
    }

    pub fn is_reclaimable(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at > self.window
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

use std::time::{Duration, Instant};

/// How long feedback stays on the status line.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

/// One line of feedback for the last key action.
pub struct StatusMessage {
    pub text: String,
    pub expires: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expires: Instant::now() + STATUS_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let msg = StatusMessage::new("saved");
        assert!(!msg.is_expired(Instant::now()));
        assert!(msg.is_expired(Instant::now() + STATUS_TTL + Duration::from_millis(1)));
    }
}

//! Status messages shown under the report

use std::time::{Duration, Instant};

/// How many messages the app keeps around
pub const MESSAGE_HISTORY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub message_type: MessageType,
    pub text: String,
    pub timestamp: Instant,
}

impl Message {
    pub fn new(message_type: MessageType, text: impl Into<String>) -> Self {
        Self {
            message_type,
            text: text.into(),
            timestamp: Instant::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageType::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageType::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageType::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageType::Error, text)
    }

    /// Info messages fade after ten seconds; problems stay until replaced
    pub fn is_expired(&self) -> bool {
        self.message_type == MessageType::Info
            && self.timestamp.elapsed() > Duration::from_secs(10)
    }

    pub fn icon(&self) -> &str {
        match self.message_type {
            MessageType::Info => "ℹ",
            MessageType::Success => "✓",
            MessageType::Warning => "⚠",
            MessageType::Error => "✗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(Message::success("saved").icon(), "✓");
        assert_eq!(Message::error("failed").icon(), "✗");
    }

    #[test]
    fn test_fresh_messages_are_not_expired() {
        assert!(!Message::info("hello").is_expired());
        assert!(!Message::warning("careful").is_expired());
    }
}

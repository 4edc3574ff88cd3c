//! Short-lived HUD notifications.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default display duration in seconds.
pub const DEFAULT_DURATION: f32 = 3.0;

/// Oldest entries are dropped beyond this many.
const MAX_QUEUED: usize = 8;

/// One message on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Text, e.g. "+1 Wood" or "inventory full".
    pub message: String,
    /// Icon tag for the HUD.
    pub icon: String,
    /// Seconds until it disappears.
    pub remaining: f32,
}

/// Auto-expiring queue of notifications, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    duration: f32,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl NotificationQueue {
    /// Queue whose entries live for `duration` seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            entries: VecDeque::new(),
            duration: duration.max(0.0),
        }
    }

    /// Show a message.
    pub fn push(&mut self, message: impl Into<String>, icon: impl Into<String>) {
        self.entries.push_back(Notification {
            message: message.into(),
            icon: icon.into(),
            remaining: self.duration,
        });
        while self.entries.len() > MAX_QUEUED {
            self.entries.pop_front();
        }
    }

    /// Age entries by `dt` seconds, dropping expired ones.
    pub fn update(&mut self, dt: f32) {
        for entry in &mut self.entries {
            entry.remaining -= dt;
        }
        self.entries.retain(|entry| entry.remaining > 0.0);
    }

    /// Visible entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.entries.iter()
    }

    /// Number of visible entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_after_duration() {
        let mut queue = NotificationQueue::new(3.0);
        queue.push("+1 Wood", "wood");
        queue.update(1.0);
        queue.push("+1 Berries", "berries");
        queue.update(1.5);
        assert_eq!(queue.len(), 2);

        queue.update(0.6);
        let messages: Vec<&str> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["+1 Berries"]);

        queue.update(1.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_is_bounded() {
        let mut queue = NotificationQueue::default();
        for i in 0..20 {
            queue.push(format!("note {i}"), "warning");
        }
        assert_eq!(queue.len(), MAX_QUEUED);
        assert_eq!(queue.iter().next().unwrap().message, "note 12");
    }
}

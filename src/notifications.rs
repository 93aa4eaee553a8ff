//! Notification banners: stacked, dismissible, auto-expiring

use crate::constants::NOTIFICATION_TTL;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created: Instant,
}

impl Notification {
    /// Time left before this banner expires
    pub fn remaining(&self, now: Instant) -> Duration {
        NOTIFICATION_TTL.saturating_sub(now.saturating_duration_since(self.created))
    }
}

/// Banner stack. No upper bound on how many are shown at once.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            created: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Drop every banner whose lifetime has elapsed
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|n| now.saturating_duration_since(n.created) < NOTIFICATION_TTL);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Soonest expiry among visible banners, used to schedule a repaint
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.items.iter().map(|n| n.remaining(now)).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banners_expire_without_dismissal() {
        let start = Instant::now();
        let mut stack = Notifications::default();
        stack.push_at(NotificationKind::Success, "File deleted", start);
        stack.push_at(NotificationKind::Error, "Failed to load users", start);

        stack.prune(start + Duration::from_secs(4));
        assert_eq!(stack.len(), 2);

        stack.prune(start + NOTIFICATION_TTL);
        assert!(stack.is_empty());
    }

    #[test]
    fn banners_stack_and_dismiss_individually() {
        let now = Instant::now();
        let mut stack = Notifications::default();
        let first = stack.push_at(NotificationKind::Info, "one", now);
        let second = stack.push_at(NotificationKind::Info, "two", now);
        stack.push_at(NotificationKind::Info, "three", now);
        assert_ne!(first, second);

        stack.dismiss(second);
        let left: Vec<&str> = stack.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(left, vec!["one", "three"]);
    }

    #[test]
    fn next_expiry_tracks_oldest_banner() {
        let start = Instant::now();
        let mut stack = Notifications::default();
        assert!(stack.next_expiry(start).is_none());
        stack.push_at(NotificationKind::Warning, "old", start);
        stack.push_at(NotificationKind::Warning, "new", start + Duration::from_secs(2));
        assert_eq!(
            stack.next_expiry(start + Duration::from_secs(3)),
            Some(Duration::from_secs(2))
        );
    }
}

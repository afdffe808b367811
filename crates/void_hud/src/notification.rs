//! Timed notices

use serde::{Deserialize, Serialize};

/// Seconds an informational notice stays up
pub const NOTICE_DURATION: f32 = 5.0;

/// What a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationType {
    /// Quest offers, progress and completion
    #[default]
    Quest,
    /// Journal entry opened by the player; stays until replaced
    Journal,
}

/// A titled message, optionally expiring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    /// `None` for notices that never expire
    pub time_remaining: Option<f32>,
}

impl Notification {
    /// A quest notice that hides after [`NOTICE_DURATION`]
    pub fn quest(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Quest,
            title: title.into(),
            body: body.into(),
            time_remaining: Some(NOTICE_DURATION),
        }
    }

    pub fn journal(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Journal,
            title: title.into(),
            body: body.into(),
            time_remaining: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.time_remaining = Some(duration);
        self
    }

    /// Advance the timer. Returns false once expired.
    pub fn update(&mut self, delta_time: f32) -> bool {
        match self.time_remaining.as_mut() {
            Some(remaining) => {
                *remaining -= delta_time;
                *remaining > 0.0
            }
            None => true,
        }
    }
}

/// The single quest text panel. A new notice replaces the old one and
/// restarts the timer.
#[derive(Debug, Clone, Default)]
pub struct MessagePanel {
    current: Option<Notification>,
}

impl MessagePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, notification: Notification) {
        self.current = Some(notification);
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn update(&mut self, delta_time: f32) {
        if let Some(notification) = self.current.as_mut() {
            if !notification.update(delta_time) {
                self.current = None;
            }
        }
    }
}

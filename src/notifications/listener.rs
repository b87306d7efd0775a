//! Client-side notification listeners.
//!
//! Two execution contexts consume the same [`PushMessage`] shape. The
//! background listener renders everything it receives; the foreground
//! listener checks the platform permission first and silently drops the
//! message when permission has been revoked. Neither persists state or
//! orders itself against other in-app changes.

use log::debug;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::notifications_model::PushMessage;
use super::notifications_traits::{NotificationSink, PermissionProbe};
use crate::subscriptions::Subscription;

/// Listener registered at service-worker startup, active when no foreground
/// context is open.
pub struct BackgroundListener {
    sink: Arc<dyn NotificationSink>,
}

impl BackgroundListener {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Attaches to a message stream. The subscription renders one
    /// notification per arriving message until the handle is dropped.
    pub fn attach(&self, messages: broadcast::Receiver<PushMessage>) -> Subscription<()> {
        let sink = self.sink.clone();
        Subscription::spawn(messages, (), move |_, message: PushMessage| {
            sink.show(&message.notification);
        })
    }
}

/// Listener registered at application startup, active while the app is open.
pub struct ForegroundListener {
    sink: Arc<dyn NotificationSink>,
    permission: Arc<dyn PermissionProbe>,
}

impl ForegroundListener {
    pub fn new(sink: Arc<dyn NotificationSink>, permission: Arc<dyn PermissionProbe>) -> Self {
        Self { sink, permission }
    }

    /// Attaches to a message stream, rendering only while notification
    /// permission is granted.
    pub fn attach(&self, messages: broadcast::Receiver<PushMessage>) -> Subscription<()> {
        let sink = self.sink.clone();
        let permission = self.permission.clone();
        Subscription::spawn(messages, (), move |_, message: PushMessage| {
            if permission.granted() {
                sink.show(&message.notification);
            } else {
                debug!("Notification permission not granted; dropping message");
            }
        })
    }
}

//! Transient notification banners.
//!
//! Each banner is visible for [`NotificationTiming::visible`], then moves to
//! [`Stage::Exiting`] for [`NotificationTiming::exit`] before it is removed.
//! Expiry runs as a spawned task per banner; dismissing a banner aborts it.
//! Subscribers receive the full set of active banners on every change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Banner background color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Info => "#007bff",
            Self::Warning => "#ffc107",
            Self::Error => "#dc3545",
        }
    }
}

/// Lifecycle stage of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Visible,
    Exiting,
}

/// An active banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub severity: Severity,
    pub stage: Stage,
}

/// How long banners stay up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_secs(3),
            exit: Duration::from_millis(300),
        }
    }
}

struct Entry {
    notification: Notification,
    expiry: Option<AbortHandle>,
}

struct Inner {
    timing: NotificationTiming,
    entries: Mutex<Vec<Entry>>,
    updates: watch::Sender<Vec<Notification>>,
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, entries: &[Entry]) {
        let snapshot = entries.iter().map(|e| e.notification.clone()).collect();
        self.updates.send_replace(snapshot);
    }

    fn set_stage(&self, id: Uuid, stage: Stage) {
        let mut entries = self.entries();
        if let Some(entry) = entries.iter_mut().find(|e| e.notification.id == id) {
            entry.notification.stage = stage;
            self.publish(&entries);
        }
    }

    fn remove(&self, id: Uuid) -> Option<Entry> {
        let mut entries = self.entries();
        let pos = entries.iter().position(|e| e.notification.id == id)?;
        let entry = entries.remove(pos);
        self.publish(&entries);
        Some(entry)
    }
}

/// Owner of the active banners.
///
/// Cloning yields another handle to the same set.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timing", &self.inner.timing)
            .field("active", &self.inner.entries().len())
            .finish()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NotificationTiming::default())
    }
}

impl NotificationCenter {
    #[must_use]
    pub fn new(timing: NotificationTiming) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                timing,
                entries: Mutex::new(Vec::new()),
                updates,
            }),
        }
    }

    /// Show a banner and schedule its removal.
    ///
    /// Outside a tokio runtime nothing can be scheduled and the banner stays
    /// until [`dismiss`](Self::dismiss) is called.
    pub fn show(&self, text: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            text: text.into(),
            severity,
            stage: Stage::Visible,
        };
        let id = notification.id;

        debug!(
            name: "notification.shown",
            id = %id,
            severity = ?severity,
            text = %notification.text,
            "Notification shown"
        );

        // Hold the lock while spawning so the expiry task cannot observe the
        // set before the entry is in it.
        let mut entries = self.inner.entries();
        let expiry = match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(
                handle
                    .spawn(expire(Arc::downgrade(&self.inner), id, self.inner.timing))
                    .abort_handle(),
            ),
            Err(_) => {
                warn!(
                    name: "notification.unscheduled",
                    id = %id,
                    "No runtime available; notification will not expire"
                );
                None
            }
        };
        entries.push(Entry {
            notification,
            expiry,
        });
        self.inner.publish(&entries);

        id
    }

    /// Remove a banner now and cancel its scheduled removal.
    ///
    /// Returns `false` if the banner is already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        match self.inner.remove(id) {
            Some(entry) => {
                if let Some(expiry) = entry.expiry {
                    expiry.abort();
                }
                true
            }
            None => false,
        }
    }

    /// Active banners, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .entries()
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    /// Receive the active set whenever it changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.updates.subscribe()
    }

    #[must_use]
    pub fn timing(&self) -> NotificationTiming {
        self.inner.timing
    }
}

async fn expire(center: Weak<Inner>, id: Uuid, timing: NotificationTiming) {
    tokio::time::sleep(timing.visible).await;
    match center.upgrade() {
        Some(inner) => inner.set_stage(id, Stage::Exiting),
        None => return,
    }

    tokio::time::sleep(timing.exit).await;
    if let Some(inner) = center.upgrade() {
        inner.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_banner_exits_then_disappears() {
        let center = NotificationCenter::default();
        let id = center.show("Chat cleared successfully", Severity::Info);

        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].stage, Stage::Visible);

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(center.active()[0].stage, Stage::Exiting);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_banners_stack_without_dedup() {
        let center = NotificationCenter::default();
        center.show("Please enter a message", Severity::Warning);
        center.show("Please enter a message", Severity::Warning);
        assert_eq!(center.active().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_expiry() {
        let center = NotificationCenter::default();
        let first = center.show("first", Severity::Info);
        let mut updates = center.subscribe();

        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));
        assert!(center.active().is_empty());
        assert!(updates.has_changed().unwrap());

        let second = center.show("second", Severity::Error);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(center.active().iter().all(|n| n.id != second));
    }

    #[test]
    fn test_show_without_runtime_keeps_banner() {
        let center = NotificationCenter::default();
        let id = center.show("no runtime", Severity::Info);
        assert_eq!(center.active().len(), 1);
        assert!(center.dismiss(id));
    }
}

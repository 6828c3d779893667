use std::time::Duration;

use crate::config::TOAST_EXIT_TRANSITION_MS;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// Flash categories other than `error` and `success` show as info.
    pub fn from_category(category: &str) -> Self {
        match category {
            "error" => Severity::Error,
            "success" => Severity::Success,
            _ => Severity::Info,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Severity::Success => "emblem-ok-symbolic",
            Severity::Error => "dialog-error-symbolic",
            Severity::Info => "dialog-information-symbolic",
        }
    }
}

/// A one-shot notice delivered with a page, shown once as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashNotice {
    pub category: String,
    pub message: String,
}

impl FlashNotice {
    pub fn new(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Shown,
    /// Exit transition running; detached once it finishes.
    Removing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

/// Toasts currently attached to the window, oldest first.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
    container_created: bool,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast. Returns its id and, for positive durations, when it
    /// should start removing itself.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration_ms: i64,
    ) -> (ToastId, Option<Duration>) {
        self.container_created = true;
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            phase: ToastPhase::Shown,
        });
        let expiry = u64::try_from(duration_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        (id, expiry)
    }

    /// First removal phase. Returns the exit transition delay after which
    /// [`ToastQueue::detach`] should run, or `None` if the toast is already
    /// removing or gone.
    pub fn begin_removal(&mut self, id: ToastId) -> Option<Duration> {
        let toast = self
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.phase == ToastPhase::Shown)?;
        toast.phase = ToastPhase::Removing;
        Some(Duration::from_millis(TOAST_EXIT_TRANSITION_MS))
    }

    /// Second removal phase. Returns whether anything was detached.
    pub fn detach(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts
            .retain(|t| !(t.id == id && t.phase == ToastPhase::Removing));
        self.toasts.len() != before
    }

    /// Turn a page's flash notices into toasts, consuming them so the same
    /// page cannot show them twice.
    pub fn drain_flashes(
        &mut self,
        flashes: &mut Vec<FlashNotice>,
        duration_ms: i64,
    ) -> Vec<(Toast, Option<Duration>)> {
        flashes
            .drain(..)
            .filter_map(|flash| {
                let (id, expiry) = self.notify(
                    flash.message,
                    Severity::from_category(&flash.category),
                    duration_ms,
                );
                self.get(id).cloned().map(|toast| (toast, expiry))
            })
            .collect()
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn index_of(&self, id: ToastId) -> Option<usize> {
        self.toasts.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn container_created(&self) -> bool {
        self.container_created
    }
}

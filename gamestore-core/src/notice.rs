//! Transient notifications (toasts).
//!
//! Each notice auto-dismisses after [`crate::constants::NOTICE_TTL_MS`]; the
//! host schedules that by calling [`Notices::dismiss`] with the id returned
//! from `push`. Notices can also be dismissed by hand at any time.
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-error",
            Self::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    next_id: u64,
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, text)
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, text)
    }

    /// Remove a notice; unknown ids (already dismissed) are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    /// Id of the newest notice.
    #[must_use]
    pub fn latest_id(&self) -> Option<u64> {
        self.latest().map(|n| n.id)
    }

    /// Ids of every visible notice, oldest first.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|n| n.id).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Tracks which notices already have a dismissal timer running.
#[derive(Debug, Clone, Default)]
pub struct NoticeTimers {
    scheduled: BTreeSet<u64>,
}

impl NoticeTimers {
    /// Ids among `visible` that still need a timer. Ids no longer visible are
    /// forgotten; notice ids are never reused.
    pub fn unscheduled(&mut self, visible: &[u64]) -> Vec<u64> {
        self.scheduled.retain(|id| visible.contains(id));
        visible
            .iter()
            .copied()
            .filter(|id| self.scheduled.insert(*id))
            .collect()
    }
}

//! Transient, non-blocking user notices (toasts). The host drains the queue
//! every frame and shows each notice for `duration_ms`.

use serde::{Deserialize, Serialize};
use shared::Locale;

use crate::i18n::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub duration_ms: u32,
}

/// Default display time of a notice
pub const DEFAULT_NOTICE_MS: u32 = 1500;
/// Asset failures stay up longer so the user can read them
pub const WARNING_NOTICE_MS: u32 = 5000;

#[derive(Debug)]
pub struct NoticeQueue {
    locale: Locale,
    info_ms: u32,
    pending: Vec<Notice>,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(Locale::default(), DEFAULT_NOTICE_MS)
    }
}

impl NoticeQueue {
    pub fn new(locale: Locale, info_ms: u32) -> Self {
        Self {
            locale,
            info_ms,
            pending: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Push a translated notice
    pub fn push_key(&mut self, key: &str, level: NoticeLevel) {
        let duration_ms = match level {
            NoticeLevel::Warning => WARNING_NOTICE_MS,
            _ => self.info_ms,
        };
        self.pending.push(Notice {
            message: t(self.locale, key).to_string(),
            level,
            duration_ms,
        });
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn peek(&self) -> &[Notice] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_lasts_longer() {
        let mut q = NoticeQueue::new(Locale::En, DEFAULT_NOTICE_MS);
        q.push_key("asset.fallback", NoticeLevel::Warning);
        q.push_key("history.undo", NoticeLevel::Info);
        let notices = q.take();
        assert_eq!(notices[0].duration_ms, WARNING_NOTICE_MS);
        assert_eq!(notices[1].message, "Undo");
        assert_eq!(notices[1].duration_ms, DEFAULT_NOTICE_MS);
        assert!(q.peek().is_empty());
    }
}

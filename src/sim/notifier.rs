use std::sync::{Arc, Mutex};

use super::lock;
use crate::traits::{Notice, Notifier};

/// Notifier that keeps every notice; clones share the same record
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.notices).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        log::info!("notice: {}", notice.message);
        lock(&self.notices).push(notice);
    }
}

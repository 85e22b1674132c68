/// How long a notice stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    Short,
    Long,
}

/// Short human-readable message for the host shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub duration: NoticeDuration,
}

impl Notice {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NoticeDuration::Short,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NoticeDuration::Long,
        }
    }
}

/// User-visible notification sink (a toast on device)
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Notifier that forwards notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        log::warn!("notice ({:?}): {}", notice.duration, notice.message);
    }
}

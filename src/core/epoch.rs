/// Generation token captured when an asset request is issued.
///
/// A continuation carrying a token that is no longer current belongs to a
/// retired request (timed out, or its session ended) and must not act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic source of epochs
#[derive(Debug, Default)]
pub struct EpochCounter {
    current: u64,
}

impl EpochCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Epoch {
        Epoch(self.current)
    }

    /// Retire the current epoch and return its successor
    pub fn advance(&mut self) -> Epoch {
        self.current += 1;
        Epoch(self.current)
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        epoch.0 == self.current
    }
}

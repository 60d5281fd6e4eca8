//! Completed-rep counter
//!
//! Only grows. Lives as long as the page does.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepCounter {
    count: u32,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rep, returns the new total
    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

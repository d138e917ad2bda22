use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StalenessSweepReport {
    pub examined: usize,
    pub reminded: usize,
    pub skipped_recently_notified: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagCountReset {
    pub corrected: u64,
}

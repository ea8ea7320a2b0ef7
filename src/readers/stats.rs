use std::fmt;

/// Per-file tally of records loaded and records dropped as malformed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub processed: u64,
    pub skipped: u64,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records loaded, {} skipped", self.processed, self.skipped)
    }
}

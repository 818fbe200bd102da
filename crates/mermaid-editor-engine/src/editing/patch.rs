/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub changed: Vec<std::ops::Range<usize>>,
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
}

impl Patch {
    /// True if the edit left the buffer untouched.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

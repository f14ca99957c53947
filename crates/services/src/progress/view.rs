/// Aggregated view of quiz progress, useful for UI.
///
/// `percent` counts answered questions regardless of correctness; `score`
/// counts correct answers only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
    pub score: u32,
    pub completed: bool,
}

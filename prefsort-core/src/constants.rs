/// Minimum number of items a session can rank.
pub const MIN_ITEMS: usize = 2;

/// Largest item count ranked with the exhaustive strategy.
///
/// Up to this size asking every pair (n·(n−1)/2, at most 45 questions, fewer
/// once transitive inference kicks in) is cheap enough that the guaranteed
/// total order is worth it. Above it the adaptive strategy keeps the number
/// of questions near n·log₂n.
pub const EXHAUSTIVE_MAX_ITEMS: usize = 10;

/// Maximum number of comparisons the adaptive strategy queues per follow-up
/// batch, after the pivot seed batch.
pub const TRIANGULATION_BATCH_SIZE: usize = 3;

/// Precomputed socket compatibility masks
pub mod adjacency;
/// Fixed-size bitset for tile possibility sets
pub mod bitset;
/// Weighted random resolution of a single cell
pub mod collapse;
/// Run orchestration: select, collapse, propagate until done or failed
pub mod executor;
/// Queue-driven constraint propagation to a fixpoint
pub mod propagation;
/// Minimum-entropy cell selection with seeded tie-breaking
pub mod selection;

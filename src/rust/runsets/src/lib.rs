pub mod disjoint_set;
pub mod error;
pub mod partition;
#[cfg(feature = "python")]
pub mod python;
pub mod runs;

pub use disjoint_set::DisjointSet;
pub use error::DisjointSetError;
pub use partition::Partition;
pub use runs::{
    longest_run, longest_run_hashset, longest_run_sorted, longest_runs_batch, run_partition,
};

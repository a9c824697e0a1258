//! Structural comparison of signature documents.

pub mod comparator;
pub mod normalize;
pub mod pair;
pub mod types;

pub use comparator::{compare, Comparator};
pub use pair::{compare_pair, compare_pairs, load_declarations};
pub use types::{
    CompareOptions, Difference, DifferenceKind, FileResult, FileStatus, MemberType,
};

// Export modules for library usage
pub mod cli;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod hooks;
pub mod io;
pub mod output;
pub mod signature;

// Re-export commonly used types
pub use crate::comparison::{
    compare, compare_pair, compare_pairs, CompareOptions, Difference, DifferenceKind, FileResult,
    FileStatus, MemberType,
};
pub use crate::errors::SigCompareError;
pub use crate::io::FilePair;
pub use crate::output::{aggregate, render_json, render_text, Report};
pub use crate::signature::{parse, Declaration, ParseError};

//! XML utilities for navigating the markup tree.

mod utils;

pub use utils::*;

//! aurora-schemas
//!
//! Shared data model for AURORA BMI: the frozen constants, the feature/result
//! types exchanged between the core crates (`aurora-features`,
//! `aurora-baseline`, `aurora-score`), and the `HistoryRow` wire schema used
//! by the persistence collaborator (`aurora-history`).
//!
//! Nothing in this crate performs IO. It exists so every other crate in the
//! workspace agrees on one definition of "what a day looks like".

mod constants;
mod error;
mod history;
mod types;

pub use constants::*;
pub use error::CoreError;
pub use history::HistoryRow;
pub use types::*;

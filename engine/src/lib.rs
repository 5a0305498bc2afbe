// Engine library root: split calculation, state transitions and persistence.

pub mod calculator;
pub mod config;
pub mod data;
pub mod error;
pub mod operations;
pub mod services;

pub use calculator::{ParticipantShare, SplitCalculator, SplitSummary};
pub use error::EngineError;
pub use services::{Change, SplitSession};

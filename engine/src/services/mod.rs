// Services built on top of the calculator and the stores.
pub mod split_session;

pub use split_session::{Change, SplitSession};

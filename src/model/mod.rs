//! Data-transfer objects mirroring the two REST backends.

pub mod activity;
pub mod identity;
pub mod lead;
pub mod problem;

pub use activity::*;
pub use identity::*;
pub use lead::*;
pub use problem::*;

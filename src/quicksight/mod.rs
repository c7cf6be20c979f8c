pub mod client;
pub mod convert;
pub mod describe;
pub mod error;
pub mod models;

pub use client::{QuickSightApi, QuickSightClient};
pub use error::QuickSightError;
pub use models::*;

#[cfg(test)]
pub use client::MockQuickSightApi;

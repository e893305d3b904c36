//! Price resolution and return estimation

pub mod chain;
pub mod config;
pub mod duration;
pub mod error;
pub mod holding;
pub mod log;
pub mod quote;
pub mod returns;

// Re-export main types for cleaner imports
pub use chain::QuoteProviderChain;
pub use error::{QuoteError, ReturnError};
pub use holding::{Holding, HoldingStore};
pub use quote::{QuoteProvider, QuoteResult};
pub use returns::{ReturnEstimate, cagr, estimate_return};

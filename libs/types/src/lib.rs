//! Types library for the custodial savings ledger
//!
//! Shared definitions used by the ledger and by the collaborators that drive it
//! (identity provider, settlement mechanism, notification consumers).
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Account identifiers
//! - `numeric`: Base-unit amounts with checked arithmetic
//! - `errors`: Numeric conversion errors

pub mod ids;
pub mod numeric;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::errors::*;
}

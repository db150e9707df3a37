//! Record layout and response encoding
//!
//! This module defines the stored record, the bounds applied to its text
//! fields, and the fixed two-decimal encoding used for its measurements.

pub mod decimal;
pub mod record;

/// Longest state code kept, in characters
pub const CODE_MAX_LEN: usize = 4;
/// Longest region name kept, in characters
pub const REGION_MAX_LEN: usize = 49;
/// Longest reporting period kept, in characters
pub const PERIOD_MAX_LEN: usize = 19;
/// Longest update identifier kept, in characters
pub const UPDATED_AT_MAX_LEN: usize = 19;

pub use record::Record;

//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Frame sizes, pool defaults and address limits
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. Public constants are
//! re-exported through [`crate::constants`].

pub(crate) mod constants;

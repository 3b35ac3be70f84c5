//! API middleware stack.
//!
//! A single layer: the access logger, which wraps every route.

pub mod access_log;

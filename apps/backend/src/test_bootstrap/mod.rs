//! Test-only process bootstrap helpers.

pub mod logging;

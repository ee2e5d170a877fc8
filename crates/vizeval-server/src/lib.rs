//! VizEval HTTP boundary.
//!
//! Translates HTTP bodies into core entities and back. All pipeline logic
//! lives in the `vizeval` core crate; this crate only marshals.

pub mod gateway;

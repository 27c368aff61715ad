//! Storybranch — branching story bounded context.
//!
//! Responsible for story initialization, sentence accumulation, per-page
//! candidate options and finalization of the chosen sentence path.

pub mod application;
pub mod domain;

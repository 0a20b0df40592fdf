//! Per-sample profiling and batch execution.
//!
//! A [`Profiler`] ties the stages together for one barcode panel, catalogue and
//! rule set. Each sample yields a [`SampleProfile`] or a failure reason; in a
//! batch, failures are isolated so well-formed samples still complete.
//!
//! [`Profiler`]: profile::Profiler
//! [`SampleProfile`]: profile::SampleProfile

pub mod batch;
pub mod profile;

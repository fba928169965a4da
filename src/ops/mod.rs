//! High-level operations.
//!
//! This module contains the implementation of luo commands.

pub mod doctor;
pub mod luo_build;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use luo_build::Luo;

//! Innovation Index - Lap-based self-assessment engine
//!
//! Applicants answer scored questions grouped into laps. Each lap is a
//! dimension; dimension scores, a total and a GREEN/YELLOW/RED bucket are
//! computed on submission.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;

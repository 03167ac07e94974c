//! Attendance-to-payroll computation engine for restaurant staff
//!
//! This crate turns a stream of clock-in/clock-out events into classified
//! work time (regular, overtime, night and holiday minutes) and derived
//! wages for hourly and fixed-salary employees over arbitrary date ranges,
//! including provisional estimates for employees who are still clocked in.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

//! Payroll Engine for Moroccan Salaries
//!
//! This crate computes one employee's monthly pay under Moroccan payroll
//! rules: gross pay, CNSS, AMO and CIMR contributions, progressive income
//! tax (IR), net pay, and the employer's contribution burden. Every result
//! carries an audit trace of the rules applied.
//!
//! Legal parameters are passed in explicitly, either loaded from a dated
//! YAML configuration with [`config::ConfigLoader`] or built in code.

#![warn(missing_docs)]

pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::{compute_payroll, compute_payroll_batch};

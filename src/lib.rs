//! Benefits deduction oracle for payroll API testing
//!
//! This crate computes what a payroll system should report for an employee's
//! paycheck (gross pay, benefits cost and net pay) and checks the records a
//! payroll `/Employees` API returns against those values. It also ships an
//! in-memory stub of that API and a contract suite that runs against either.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod suite;

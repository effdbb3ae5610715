//! Payroll rules configuration.
//!
//! This module provides the [`PayrollRules`] business-rule knobs and a
//! loader for reading them from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::RulesLoader;
//!
//! let loader = RulesLoader::load("./config/payroll.yaml").unwrap();
//! println!("Weekly day off: {}", loader.rules().excluded_weekday);
//! ```

mod loader;
mod types;

pub use loader::RulesLoader;
pub use types::PayrollRules;

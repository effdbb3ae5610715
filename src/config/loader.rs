//! Rules loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading payroll rules
//! from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollRules;

/// Loads and provides access to the payroll rules.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RulesLoader;
///
/// let loader = RulesLoader::load("./config/payroll.yaml")?;
/// let rules = loader.rules();
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RulesLoader {
    rules: PayrollRules,
}

impl RulesLoader {
    /// Loads rules from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParse` if it contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let rules = serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { rules })
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> PayrollRules {
        self.rules
    }
}

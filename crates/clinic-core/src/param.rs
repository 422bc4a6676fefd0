//! Validated, immutable simulation parameters.
//!
//! # Construction paths
//!
//! ```rust
//! use clinic_core::Param;
//!
//! let param = Param::builder()
//!     .patient_inter(4.0)
//!     .number_of_nurses(4)
//!     .warm_up_period(500.0)
//!     .data_collection_period(1500.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(param.run_length(), 2000.0);
//! ```
//!
//! Parameters may also be loaded from a JSON document with
//! [`Param::from_json_reader`].  Missing fields take their defaults; unknown
//! fields are rejected so a misspelt name can never be silently ignored.
//!
//! Every path ends in [`ParamBuilder::build`], which enforces:
//!
//! | Parameter                | Rule  |
//! |--------------------------|-------|
//! | `patient_inter`          | > 0   |
//! | `mean_n_consult_time`    | > 0   |
//! | `number_of_nurses`       | > 0   |
//! | `number_of_runs`         | > 0   |
//! | `audit_interval`         | > 0   |
//! | `warm_up_period`         | >= 0  |
//! | `data_collection_period` | >= 0  |
//! | `cores` (when `Some`)    | > 0   |

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

// ── Param ─────────────────────────────────────────────────────────────────────

/// Parameters for one study (a family of replications).
///
/// Fields are private: once built, a `Param` is read-only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Param {
    patient_inter:          f64,
    mean_n_consult_time:    f64,
    number_of_nurses:       usize,
    warm_up_period:         f64,
    data_collection_period: f64,
    number_of_runs:         u32,
    audit_interval:         f64,
    scenario_name:          String,
    cores:                  Option<usize>,
}

impl Param {
    pub fn builder() -> ParamBuilder {
        ParamBuilder::default()
    }

    /// Rebuild from this parameter set, e.g. to vary one field in a scenario.
    pub fn to_builder(&self) -> ParamBuilder {
        ParamBuilder {
            patient_inter:          self.patient_inter,
            mean_n_consult_time:    self.mean_n_consult_time,
            number_of_nurses:       self.number_of_nurses,
            warm_up_period:         self.warm_up_period,
            data_collection_period: self.data_collection_period,
            number_of_runs:         self.number_of_runs,
            audit_interval:         self.audit_interval,
            scenario_name:          self.scenario_name.clone(),
            cores:                  self.cores,
        }
    }

    /// Load a JSON parameter document over the defaults and validate it.
    pub fn from_json_reader<R: Read>(reader: R) -> ConfigResult<Param> {
        let builder: ParamBuilder =
            serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))?;
        builder.build()
    }

    pub fn from_json_str(s: &str) -> ConfigResult<Param> {
        Self::from_json_reader(s.as_bytes())
    }

    pub fn from_json_path(path: &Path) -> ConfigResult<Param> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Mean time between patient arrivals.
    #[inline]
    pub fn patient_inter(&self) -> f64 {
        self.patient_inter
    }

    /// Mean nurse consultation duration.
    #[inline]
    pub fn mean_n_consult_time(&self) -> f64 {
        self.mean_n_consult_time
    }

    #[inline]
    pub fn number_of_nurses(&self) -> usize {
        self.number_of_nurses
    }

    #[inline]
    pub fn warm_up_period(&self) -> f64 {
        self.warm_up_period
    }

    #[inline]
    pub fn data_collection_period(&self) -> f64 {
        self.data_collection_period
    }

    #[inline]
    pub fn number_of_runs(&self) -> u32 {
        self.number_of_runs
    }

    #[inline]
    pub fn audit_interval(&self) -> f64 {
        self.audit_interval
    }

    #[inline]
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    /// Worker threads for the trial.  `Some(1)` runs sequentially, `None` uses
    /// all logical cores.
    #[inline]
    pub fn cores(&self) -> Option<usize> {
        self.cores
    }

    /// Total simulated time: warm-up followed by data collection.
    #[inline]
    pub fn run_length(&self) -> f64 {
        self.warm_up_period + self.data_collection_period
    }
}

impl Default for Param {
    fn default() -> Self {
        ParamBuilder::default().assemble()
    }
}

// ── ParamBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Param`].  Also the JSON document schema.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamBuilder {
    patient_inter:          f64,
    mean_n_consult_time:    f64,
    number_of_nurses:       usize,
    warm_up_period:         f64,
    data_collection_period: f64,
    number_of_runs:         u32,
    audit_interval:         f64,
    scenario_name:          String,
    cores:                  Option<usize>,
}

impl Default for ParamBuilder {
    fn default() -> Self {
        Self {
            patient_inter:          5.0,
            mean_n_consult_time:    35.0,
            number_of_nurses:       9,
            warm_up_period:         0.0,
            data_collection_period: 600.0,
            number_of_runs:         5,
            audit_interval:         5.0,
            scenario_name:          "base".to_owned(),
            cores:                  Some(1),
        }
    }
}

impl ParamBuilder {
    pub fn patient_inter(mut self, v: f64) -> Self {
        self.patient_inter = v;
        self
    }

    pub fn mean_n_consult_time(mut self, v: f64) -> Self {
        self.mean_n_consult_time = v;
        self
    }

    pub fn number_of_nurses(mut self, v: usize) -> Self {
        self.number_of_nurses = v;
        self
    }

    pub fn warm_up_period(mut self, v: f64) -> Self {
        self.warm_up_period = v;
        self
    }

    pub fn data_collection_period(mut self, v: f64) -> Self {
        self.data_collection_period = v;
        self
    }

    pub fn number_of_runs(mut self, v: u32) -> Self {
        self.number_of_runs = v;
        self
    }

    pub fn audit_interval(mut self, v: f64) -> Self {
        self.audit_interval = v;
        self
    }

    pub fn scenario_name(mut self, v: impl Into<String>) -> Self {
        self.scenario_name = v.into();
        self
    }

    pub fn cores(mut self, v: Option<usize>) -> Self {
        self.cores = v;
        self
    }

    /// Validate every field and return the immutable [`Param`].
    pub fn build(self) -> ConfigResult<Param> {
        positive("patient_inter", self.patient_inter)?;
        positive("mean_n_consult_time", self.mean_n_consult_time)?;
        positive("audit_interval", self.audit_interval)?;
        non_negative("warm_up_period", self.warm_up_period)?;
        non_negative("data_collection_period", self.data_collection_period)?;

        if self.number_of_nurses == 0 {
            return Err(ConfigError::NotPositive("number_of_nurses"));
        }
        if self.number_of_runs == 0 {
            return Err(ConfigError::NotPositive("number_of_runs"));
        }
        if self.cores == Some(0) {
            return Err(ConfigError::NotPositive("cores"));
        }

        Ok(self.assemble())
    }

    fn assemble(self) -> Param {
        Param {
            patient_inter:          self.patient_inter,
            mean_n_consult_time:    self.mean_n_consult_time,
            number_of_nurses:       self.number_of_nurses,
            warm_up_period:         self.warm_up_period,
            data_collection_period: self.data_collection_period,
            number_of_runs:         self.number_of_runs,
            audit_interval:         self.audit_interval,
            scenario_name:          self.scenario_name,
            cores:                  self.cores,
        }
    }
}

fn positive(name: &'static str, v: f64) -> ConfigResult<()> {
    if v.is_nan() || v.is_infinite() {
        return Err(ConfigError::NotFinite(name));
    }
    if v <= 0.0 {
        return Err(ConfigError::NotPositive(name));
    }
    Ok(())
}

fn non_negative(name: &'static str, v: f64) -> ConfigResult<()> {
    if v.is_nan() || v.is_infinite() {
        return Err(ConfigError::NotFinite(name));
    }
    if v < 0.0 {
        return Err(ConfigError::Negative(name));
    }
    Ok(())
}

//! Plain data row types produced by a replication.
//!
//! Unknown values (a patient never seen, a ratio over an empty window) are
//! `f64::NAN`, never zero, so "served with no wait" stays distinguishable from
//! "never served".

use serde::Serialize;

use crate::PatientStage;

/// One patient who arrived during the data-collection window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRow {
    pub patient_id:      u32,
    pub run:             u32,
    pub arrival_time:    f64,
    /// NaN unless the patient departed before the horizon.
    pub q_time_nurse:    f64,
    /// NaN unless the patient departed before the horizon.
    pub time_with_nurse: f64,
    pub outcome:         PatientStage,
}

/// A snapshot of the nurse resource at one audit tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalAuditRow {
    pub run:                    u32,
    pub simulation_time:        f64,
    pub number_utilised:        usize,
    pub number_available:       usize,
    pub queue_length:           usize,
    pub utilisation:            f64,
    /// Mean queue time of recorded patients who departed so far; 0 before
    /// the first departure.
    pub running_mean_wait_time: f64,
}

/// Scalar aggregates for one replication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_number:                u32,
    pub scenario:                  String,
    pub arrivals:                  usize,
    pub mean_q_time_nurse:         f64,
    pub mean_time_with_nurse:      f64,
    /// Nurse-occupied time clipped to the data-collection window.
    pub nurse_busy_time:           f64,
    /// `nurse_busy_time / (nurses × data_collection_period)`.
    pub mean_nurse_utilisation:    f64,
    /// Time-weighted utilisation from the monitored resource.
    pub mean_nurse_utilisation_tw: f64,
    pub mean_nurse_q_length:       f64,
    /// Recorded patients still queueing at the horizon.
    pub count_unseen:              usize,
    /// Mean of `horizon − arrival_time` over unseen patients.
    pub mean_q_time_unseen:        f64,
}

impl RunSummary {
    /// Numeric metrics by column name, in output order.  Aggregated across
    /// replications by `clinic-trial`.
    pub fn metrics(&self) -> [(&'static str, f64); 9] {
        [
            ("arrivals", self.arrivals as f64),
            ("mean_q_time_nurse", self.mean_q_time_nurse),
            ("mean_time_with_nurse", self.mean_time_with_nurse),
            ("nurse_busy_time", self.nurse_busy_time),
            ("mean_nurse_utilisation", self.mean_nurse_utilisation),
            ("mean_nurse_utilisation_tw", self.mean_nurse_utilisation_tw),
            ("mean_nurse_q_length", self.mean_nurse_q_length),
            ("count_unseen", self.count_unseen as f64),
            ("mean_q_time_unseen", self.mean_q_time_unseen),
        ]
    }

    /// Whether the two independently derived utilisation figures agree.
    ///
    /// Both NaN (empty window) counts as agreement.
    pub fn utilisation_consistent(&self, tolerance: f64) -> bool {
        let (a, b) = (self.mean_nurse_utilisation, self.mean_nurse_utilisation_tw);
        (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
    }
}

/// Everything one replication produces.  Immutable once returned.
#[derive(Debug, Clone)]
pub struct RunResults {
    pub patients:       Vec<PatientRow>,
    pub interval_audit: Vec<IntervalAuditRow>,
    pub summary:        RunSummary,
}

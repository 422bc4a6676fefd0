//! Per-patient journey state.

use clinic_core::{PatientId, SimTime};
use serde::Serialize;

/// Where a patient is in the clinic.
///
/// `Arrived` only exists between creation and the nurse request, which happen
/// in the same event; a patient still `Queued` or `InService` at the horizon
/// is unobserved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStage {
    Arrived,
    Queued,
    InService,
    Departed,
}

/// One patient.  Created at arrival and kept until the run ends, served or not.
#[derive(Clone, Debug)]
pub struct Patient {
    pub id:               PatientId,
    pub arrival_time:     SimTime,
    /// Set when the nurse is granted.
    pub service_start:    Option<SimTime>,
    /// Sampled when the nurse is granted.
    pub service_duration: Option<f64>,
    pub stage:            PatientStage,
}

impl Patient {
    pub fn new(id: PatientId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            service_start: None,
            service_duration: None,
            stage: PatientStage::Arrived,
        }
    }

    /// Time spent queueing for the nurse, once granted.
    pub fn queue_time(&self) -> Option<f64> {
        self.service_start.map(|s| s - self.arrival_time)
    }

    /// Queue time, only for patients who completed their consultation.
    pub fn observed_queue_time(&self) -> Option<f64> {
        match self.stage {
            PatientStage::Departed => self.queue_time(),
            _ => None,
        }
    }

    /// Consultation duration, only for patients who completed it.
    pub fn observed_service_duration(&self) -> Option<f64> {
        match self.stage {
            PatientStage::Departed => self.service_duration,
            _ => None,
        }
    }
}

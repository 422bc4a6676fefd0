//! `Runner` — executes one replication and converts its trace into tables.

use clinic_core::{Param, RunId, SimTime};
use clinic_engine::{Engine, EngineObserver};
use tracing::debug;

use crate::{
    ClinicModel, ModelResult, PatientRow, PatientStage, RunResults, RunSummary,
};

/// Counts handled events for the replication log line.
#[derive(Default)]
struct EventTally {
    events:    u64,
    abandoned: usize,
}

impl EngineObserver for EventTally {
    fn on_event(&mut self, _now: SimTime) {
        self.events += 1;
    }

    fn on_horizon(&mut self, _now: SimTime, pending: usize) {
        self.abandoned = pending;
    }
}

/// Runs single replications of the clinic for one parameter set.
///
/// A replication is a pure function of `(param, run)`: it owns its engine,
/// resource, and random streams, so any number may run concurrently.
#[derive(Clone, Debug)]
pub struct Runner {
    param: Param,
}

impl Runner {
    pub fn new(param: Param) -> Self {
        Self { param }
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    /// Run replication `run` to the horizon and build its result tables.
    pub fn run_single(&self, run: RunId) -> ModelResult<RunResults> {
        let mut engine = Engine::new(ClinicModel::new(&self.param, run)?);
        {
            let (model, sched) = engine.parts_mut();
            model.start(sched)?;
        }

        let horizon = engine.model().horizon();
        let mut tally = EventTally::default();
        engine.run_until(horizon, &mut tally)?;
        engine.model_mut().finish(horizon);

        debug!(
            run = run.0,
            events = tally.events,
            abandoned = tally.abandoned,
            "replication complete"
        );

        Ok(self.collect(engine.into_model()))
    }

    fn collect(&self, model: ClinicModel) -> RunResults {
        let run = model.run();
        let horizon = model.horizon();

        let patients: Vec<PatientRow> = model
            .recorded_patients()
            .map(|p| PatientRow {
                patient_id:      p.id.0,
                run:             run.0,
                arrival_time:    p.arrival_time.0,
                q_time_nurse:    p.observed_queue_time().unwrap_or(f64::NAN),
                time_with_nurse: p.observed_service_duration().unwrap_or(f64::NAN),
                outcome:         p.stage,
            })
            .collect();

        let unseen_waits: Vec<f64> = model
            .recorded_patients()
            .filter(|p| p.stage == PatientStage::Queued)
            .map(|p| horizon - p.arrival_time)
            .collect();

        let collection = self.param.data_collection_period();
        let nurses = self.param.number_of_nurses() as f64;
        let nurse = model.nurse();

        let summary = RunSummary {
            run_number:                run.0,
            scenario:                  self.param.scenario_name().to_owned(),
            arrivals:                  patients.len(),
            mean_q_time_nurse:         mean(patients.iter().map(|r| r.q_time_nurse)),
            mean_time_with_nurse:      mean(patients.iter().map(|r| r.time_with_nurse)),
            nurse_busy_time:           model.nurse_busy_time(),
            mean_nurse_utilisation:    model.nurse_busy_time() / (nurses * collection),
            mean_nurse_utilisation_tw: nurse.utilisation(collection),
            mean_nurse_q_length:       nurse.mean_queue_length(collection),
            count_unseen:              unseen_waits.len(),
            mean_q_time_unseen:        mean(unseen_waits.iter().copied()),
        };

        RunResults {
            patients,
            interval_audit: model.audit_rows().to_vec(),
            summary,
        }
    }
}

/// Mean of the non-NaN values; NaN when there are none.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

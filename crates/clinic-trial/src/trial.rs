//! `Trial` — orchestrates independent replications.

use clinic_core::{Param, RunId};
use clinic_model::{IntervalAuditRow, ModelResult, PatientRow, RunResults, RunSummary, Runner};
use rayon::prelude::*;
use tracing::info;

use crate::{OverallRow, TrialError, TrialResult, summarise_runs};

/// Concatenated and aggregated results of every replication.
#[derive(Debug, Clone)]
pub struct TrialResults {
    pub patients:       Vec<PatientRow>,
    pub interval_audit: Vec<IntervalAuditRow>,
    pub runs:           Vec<RunSummary>,
    pub overall:        Vec<OverallRow>,
}

/// Runs `param.number_of_runs()` replications with run indices `0..n`.
#[derive(Clone, Debug)]
pub struct Trial {
    runner: Runner,
}

impl Trial {
    pub fn new(param: Param) -> Self {
        Self { runner: Runner::new(param) }
    }

    pub fn param(&self) -> &Param {
        self.runner.param()
    }

    /// Execute one replication.
    pub fn run_single(&self, run: RunId) -> TrialResult<RunResults> {
        self.runner
            .run_single(run)
            .map_err(|source| TrialError::Replication { run, source })
    }

    /// Execute every replication and aggregate.
    ///
    /// Fails with the lowest-indexed failing replication; no partial tables
    /// are returned.
    pub fn run_reps(&self) -> TrialResult<TrialResults> {
        let param = self.runner.param();
        let runs: Vec<RunId> = (0..param.number_of_runs()).map(RunId).collect();

        info!(
            scenario = param.scenario_name(),
            runs = runs.len(),
            cores = ?param.cores(),
            "starting trial"
        );

        let outcomes: Vec<(RunId, ModelResult<RunResults>)> = match param.cores() {
            Some(1) => runs
                .iter()
                .map(|&run| (run, self.runner.run_single(run)))
                .collect(),
            threads => {
                let mut builder = rayon::ThreadPoolBuilder::new();
                if let Some(n) = threads {
                    builder = builder.num_threads(n);
                }
                let pool = builder.build()?;
                pool.install(|| {
                    runs.par_iter()
                        .map(|&run| (run, self.runner.run_single(run)))
                        .collect()
                })
            }
        };

        let results = merge_ordered(outcomes)?;
        let trial = aggregate(results);
        info!(
            patients = trial.patients.len(),
            audits = trial.interval_audit.len(),
            "trial complete"
        );
        Ok(trial)
    }
}

/// Sort by run index and surface the first failure.
fn merge_ordered(
    mut outcomes: Vec<(RunId, ModelResult<RunResults>)>,
) -> TrialResult<Vec<RunResults>> {
    outcomes.sort_by_key(|(run, _)| *run);
    outcomes
        .into_iter()
        .map(|(run, result)| result.map_err(|source| TrialError::Replication { run, source }))
        .collect()
}

/// Concatenate per-run tables and compute the overall summary.
pub(crate) fn aggregate(results: Vec<RunResults>) -> TrialResults {
    let mut patients = Vec::new();
    let mut interval_audit = Vec::new();
    let mut runs = Vec::with_capacity(results.len());

    for r in results {
        patients.extend(r.patients);
        interval_audit.extend(r.interval_audit);
        runs.push(r.summary);
    }

    let overall = summarise_runs(&runs);
    TrialResults { patients, interval_audit, runs, overall }
}

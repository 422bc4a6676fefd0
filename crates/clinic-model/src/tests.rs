//! Integration tests for clinic-model.

use clinic_core::{Param, PatientId, RunId, SimTime};
use clinic_engine::{Engine, NoopObserver};

use crate::{ClinicEvent, ClinicModel, PatientStage, RunResults, Runner};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn run(param: Param, run: u32) -> RunResults {
    Runner::new(param).run_single(RunId(run)).unwrap()
}

/// Moderately loaded clinic: enough arrivals that waits vary.
fn busy_param() -> clinic_core::ParamBuilder {
    Param::builder()
        .number_of_nurses(4)
        .patient_inter(3.0)
        .mean_n_consult_time(15.0)
}

// ── Patient rows and invariants ───────────────────────────────────────────────

#[cfg(test)]
mod results {
    use super::*;

    #[test]
    fn defaults_process_patients_with_non_negative_times() {
        let r = run(Param::default(), 0);
        assert!(!r.patients.is_empty(), "expected at least one patient");
        for row in &r.patients {
            match row.outcome {
                PatientStage::Departed => {
                    assert!(row.q_time_nurse >= 0.0, "negative wait {}", row.q_time_nurse);
                    assert!(row.time_with_nurse >= 0.0);
                }
                _ => {
                    assert!(row.q_time_nurse.is_nan());
                    assert!(row.time_with_nurse.is_nan());
                }
            }
        }
    }

    #[test]
    fn patient_ids_increase_and_arrivals_ordered() {
        let r = run(Param::default(), 3);
        for pair in r.patients.windows(2) {
            assert_eq!(pair[1].patient_id, pair[0].patient_id + 1);
            assert!(pair[1].arrival_time >= pair[0].arrival_time);
        }
        assert!(r.patients.iter().all(|p| p.run == 3));
    }

    #[test]
    fn arrivals_matches_patient_rows() {
        let r = run(Param::default(), 1);
        assert_eq!(r.summary.arrivals, r.patients.len());
    }

    #[test]
    fn summary_mean_wait_matches_rows() {
        let r = run(busy_param().build().unwrap(), 0);
        let departed: Vec<f64> = r
            .patients
            .iter()
            .filter(|p| p.outcome == PatientStage::Departed)
            .map(|p| p.q_time_nurse)
            .collect();
        let expected = departed.iter().sum::<f64>() / departed.len() as f64;
        assert!((r.summary.mean_q_time_nurse - expected).abs() < 1e-9);
    }

    #[test]
    fn utilisation_figures_agree() {
        for run_id in 0..5 {
            let r = run(Param::default(), run_id);
            assert!(
                r.summary.utilisation_consistent(0.001),
                "run {run_id}: {} vs {}",
                r.summary.mean_nurse_utilisation,
                r.summary.mean_nurse_utilisation_tw,
            );
        }
    }

    #[test]
    fn utilisation_figures_agree_with_warm_up() {
        let param = busy_param()
            .warm_up_period(300.0)
            .data_collection_period(900.0)
            .build()
            .unwrap();
        let r = run(param, 2);
        assert!(r.summary.utilisation_consistent(0.001));
        assert!(r.summary.mean_nurse_utilisation > 0.0);
    }

    #[test]
    fn interval_audit_bounds() {
        let r = run(Param::default(), 0);
        assert!(!r.interval_audit.is_empty());
        for row in &r.interval_audit {
            assert!((0.0..=1.0).contains(&row.utilisation));
            assert!(row.number_utilised <= row.number_available);
            assert_eq!(row.number_available, 9);
        }
    }

    #[test]
    fn interval_audit_stays_before_horizon() {
        let param = Param::default();
        let horizon = param.run_length();
        let r = run(param, 0);
        let max = r
            .interval_audit
            .iter()
            .map(|a| a.simulation_time)
            .fold(f64::MIN, f64::max);
        assert!(max < horizon, "audit at {max} >= horizon {horizon}");
        // 600 / 5 ticks: 0, 5, …, 595.
        assert_eq!(r.interval_audit.len(), 120);
    }

    #[test]
    fn seed_stability() {
        let a = run(Param::default(), 33);
        let b = run(Param::default(), 33);
        assert_eq!(format!("{:?}", a.patients), format!("{:?}", b.patients));
        assert_eq!(format!("{:?}", a.interval_audit), format!("{:?}", b.interval_audit));
        assert_eq!(format!("{:?}", a.summary), format!("{:?}", b.summary));
    }

    #[test]
    fn different_runs_differ() {
        let a = run(Param::default(), 0);
        let b = run(Param::default(), 1);
        assert_ne!(format!("{:?}", a.patients), format!("{:?}", b.patients));
    }
}

// ── Saturation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod saturation {
    use super::*;

    #[test]
    fn high_demand_keeps_utilisation_bounded_and_last_patient_unseen() {
        let param = Param::builder()
            .number_of_nurses(1)
            .patient_inter(0.1)
            .build()
            .unwrap();
        let r = run(param, 0);

        let util = r.summary.mean_nurse_utilisation;
        assert!((0.0..=1.0).contains(&util), "utilisation {util}");
        assert!(r.interval_audit.iter().all(|a| (0.0..=1.0).contains(&a.utilisation)));

        let last = r.patients.last().unwrap();
        assert_eq!(last.outcome, PatientStage::Queued);
        assert!(last.q_time_nurse.is_nan());
        assert!(last.time_with_nurse.is_nan());

        assert!(r.summary.count_unseen > 0);
        assert!(r.summary.mean_q_time_unseen > 0.0);
        assert!(r.summary.mean_nurse_q_length > 0.0);
    }

    #[test]
    fn in_service_at_horizon_is_unobserved() {
        // One nurse, consultations far longer than the run.
        let param = Param::builder()
            .number_of_nurses(1)
            .patient_inter(1.0)
            .mean_n_consult_time(1_000_000.0)
            .data_collection_period(50.0)
            .build()
            .unwrap();
        let r = run(param, 0);
        let first = &r.patients[0];
        assert_eq!(first.outcome, PatientStage::InService);
        assert!(first.q_time_nurse.is_nan());
        assert!(r.summary.mean_q_time_nurse.is_nan());
        // Nurse busy from first arrival to the horizon, within tolerance.
        assert!(r.summary.utilisation_consistent(1e-9));
    }
}

// ── Warm-up ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod warm_up {
    use super::*;

    #[test]
    fn warm_up_only_records_nothing() {
        let param = Param::builder()
            .warm_up_period(500.0)
            .data_collection_period(0.0)
            .build()
            .unwrap();
        let r = run(param, 0);
        assert!(r.patients.is_empty());
        assert!(r.interval_audit.is_empty());
        assert_eq!(r.summary.nurse_busy_time, 0.0);
        assert_eq!(r.summary.arrivals, 0);
    }

    #[test]
    fn first_patient_and_audit_after_warm_up() {
        let param = busy_param()
            .warm_up_period(500.0)
            .data_collection_period(1500.0)
            .audit_interval(50.0)
            .build()
            .unwrap();
        let r = run(param, 0);
        assert!(r.patients[0].arrival_time > 500.0);
        assert_eq!(r.interval_audit[0].simulation_time, 500.0);
        assert_eq!(r.interval_audit[0].running_mean_wait_time, 0.0);
        assert_eq!(r.interval_audit[1].simulation_time, 550.0);
    }

    #[test]
    fn warm_up_lets_queue_build_before_recording() {
        let with = run(
            Param::builder()
                .patient_inter(3.0)
                .warm_up_period(500.0)
                .data_collection_period(1500.0)
                .build()
                .unwrap(),
            0,
        );
        assert!(with.patients[0].q_time_nurse > 0.0, "{:?}", with.patients[0]);
    }

    #[test]
    fn without_warm_up_first_patient_walks_straight_in() {
        let none = run(
            Param::builder()
                .patient_inter(1.0)
                .data_collection_period(1500.0)
                .build()
                .unwrap(),
            0,
        );
        assert!(none.patients[0].arrival_time > 0.0);
        assert_eq!(none.patients[0].q_time_nurse, 0.0);

        let first = &none.interval_audit[0];
        assert_eq!(first.simulation_time, 0.0);
        assert_eq!(first.utilisation, 0.0);
        assert_eq!(first.queue_length, 0);
        assert_eq!(first.running_mean_wait_time, 0.0);
    }

    #[test]
    fn warm_up_off_grid_still_audits_at_boundary() {
        let param = Param::builder()
            .warm_up_period(7.5)
            .data_collection_period(20.0)
            .audit_interval(5.0)
            .build()
            .unwrap();
        let r = run(param, 0);
        let times: Vec<f64> = r.interval_audit.iter().map(|a| a.simulation_time).collect();
        assert_eq!(times, vec![7.5, 12.5, 17.5, 22.5]);
    }

    #[test]
    fn warm_up_patients_still_occupy_nurses() {
        let model_param = busy_param()
            .warm_up_period(200.0)
            .data_collection_period(200.0)
            .build()
            .unwrap();
        let mut engine = Engine::new(ClinicModel::new(&model_param, RunId(0)).unwrap());
        {
            let (model, sched) = engine.parts_mut();
            model.start(sched).unwrap();
        }
        engine.run_until(SimTime(400.0), &mut NoopObserver).unwrap();
        let m = engine.model();
        let all = m.patients().len();
        let recorded = m.recorded_patients().count();
        assert!(all > recorded, "warm-up patients should exist but not be recorded");
        assert!(m.patients().iter().any(|p| p.arrival_time < SimTime(200.0)
            && p.stage == PatientStage::Departed));
    }
}

// ── Sensitivity ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensitivity {
    use super::*;

    fn wait_and_util(builder: clinic_core::ParamBuilder) -> (f64, f64) {
        let r = run(builder.build().unwrap(), 0);
        (r.summary.mean_q_time_nurse, r.summary.mean_nurse_utilisation)
    }

    fn assert_decreases(initial: clinic_core::ParamBuilder, adjusted: clinic_core::ParamBuilder) {
        let (w0, u0) = wait_and_util(initial);
        let (w1, u1) = wait_and_util(adjusted);
        assert!(w0 > w1, "wait did not decrease: {w0} -> {w1}");
        assert!(u0 > u1, "utilisation did not decrease: {u0} -> {u1}");
    }

    #[test]
    fn more_nurses() {
        assert_decreases(busy_param().number_of_nurses(3), busy_param().number_of_nurses(9));
    }

    #[test]
    fn fewer_arrivals() {
        assert_decreases(busy_param().patient_inter(2.0), busy_param().patient_inter(15.0));
    }

    #[test]
    fn shorter_consultations() {
        assert_decreases(
            busy_param().mean_n_consult_time(30.0),
            busy_param().mean_n_consult_time(3.0),
        );
    }

    #[test]
    fn arrivals_scale_with_rate_and_duration() {
        let count = |b: clinic_core::ParamBuilder| run(b.build().unwrap(), 0).summary.arrivals;
        assert!(count(Param::builder().patient_inter(2.0)) > count(Param::builder().patient_inter(15.0)));
        assert!(
            count(Param::builder().data_collection_period(2000.0))
                > count(Param::builder().data_collection_period(500.0))
        );
    }
}

// ── Model internals ───────────────────────────────────────────────────────────

#[cfg(test)]
mod model {
    use super::*;
    use crate::ModelError;

    #[test]
    fn unknown_patient_is_error() {
        let mut engine = Engine::new(ClinicModel::new(&Param::default(), RunId(0)).unwrap());
        engine
            .scheduler_mut()
            .schedule_at(SimTime(1.0), ClinicEvent::ConsultationEnd(PatientId(99)))
            .unwrap();
        let err = engine.run_until(SimTime(2.0), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, ModelError::UnknownPatient(PatientId(99))));
    }

    #[test]
    fn nurse_counts_match_patient_stages_at_horizon() {
        let param = busy_param().build().unwrap();
        let mut engine = Engine::new(ClinicModel::new(&param, RunId(4)).unwrap());
        {
            let (model, sched) = engine.parts_mut();
            model.start(sched).unwrap();
        }
        engine.run_until(SimTime(param.run_length()), &mut NoopObserver).unwrap();
        let m = engine.model();
        // Grants are resumed at the instant they are made, so none is
        // pending once the clock reaches the horizon.
        let in_service = m.patients().iter().filter(|p| p.stage == PatientStage::InService).count();
        let queued = m.patients().iter().filter(|p| p.stage == PatientStage::Queued).count();
        assert_eq!(in_service, m.nurse().in_use());
        assert_eq!(queued, m.nurse().queue_len());
    }
}

// ── Properties over valid configurations ──────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn param_strategy() -> impl Strategy<Value = Param> {
        (1usize..6, 0.5f64..10.0, 1.0f64..40.0, 0.0f64..100.0, 0.0f64..200.0, 1.0f64..20.0)
            .prop_map(|(nurses, inter, consult, warm, collect, audit)| {
                Param::builder()
                    .number_of_nurses(nurses)
                    .patient_inter(inter)
                    .mean_n_consult_time(consult)
                    .warm_up_period(warm)
                    .data_collection_period(collect)
                    .audit_interval(audit)
                    .build()
                    .unwrap()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn rows_respect_invariants(param in param_strategy(), run_id in 0u32..1000) {
            let warm_up = param.warm_up_period();
            let horizon = param.run_length();
            let r = run(param, run_id);

            for p in &r.patients {
                prop_assert!(p.arrival_time >= warm_up && p.arrival_time < horizon);
                let observed = p.outcome == PatientStage::Departed;
                prop_assert_eq!(observed, !p.q_time_nurse.is_nan());
                prop_assert_eq!(observed, !p.time_with_nurse.is_nan());
                if observed {
                    prop_assert!(p.q_time_nurse >= 0.0);
                    prop_assert!(p.time_with_nurse >= 0.0);
                }
            }
            for a in &r.interval_audit {
                prop_assert!(a.simulation_time >= warm_up && a.simulation_time < horizon);
                prop_assert!((0.0..=1.0).contains(&a.utilisation));
                prop_assert!(a.running_mean_wait_time >= 0.0);
            }
            prop_assert!(r.summary.utilisation_consistent(0.001));
            prop_assert!(r.summary.nurse_busy_time >= 0.0);
        }
    }
}

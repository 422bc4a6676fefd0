//! `ClinicModel` — the arrival generator, patient journeys, and interval
//! auditor for a single-stage nurse clinic.

use clinic_core::{Exponential, Param, PatientId, RunId, SimTime, StreamId};
use clinic_engine::{Model, MonitoredResource, Request, Scheduler};

use crate::{IntervalAuditRow, ModelError, ModelResult, Patient, PatientStage};

/// Every continuation of every clinic process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClinicEvent {
    /// Arrival generator wakes: the next patient walks in.
    Arrival,
    /// A nurse has been granted to the patient.
    NurseGranted(PatientId),
    /// The patient's consultation is over.
    ConsultationEnd(PatientId),
    /// Interval auditor tick.
    Audit,
}

/// State of one replication of the clinic.
///
/// Patients arriving before `warm_up` still occupy nurses and delay others,
/// but produce no rows.  Audit ticks before `warm_up` record nothing.
pub struct ClinicModel {
    run:            RunId,
    warm_up:        SimTime,
    horizon:        SimTime,
    audit_interval: f64,

    nurse:          MonitoredResource<PatientId>,
    arrival_stream: Exponential,
    consult_stream: Exponential,

    /// Indexed by `PatientId - 1`.
    patients:        Vec<Patient>,
    audit:           Vec<IntervalAuditRow>,
    nurse_busy_time: f64,
    wait_sum:        f64,
    wait_count:      usize,
    /// Audit ticks issued before / since the warm-up boundary.
    ticks_before:    u64,
    ticks_since:     u64,
}

impl ClinicModel {
    /// Build the model for replication `run`.  Random streams are seeded from
    /// the replication index.
    pub fn new(param: &Param, run: RunId) -> ModelResult<Self> {
        let seed = u64::from(run);
        let warm_up = SimTime(param.warm_up_period());
        Ok(Self {
            run,
            warm_up,
            horizon: SimTime(param.run_length()),
            audit_interval: param.audit_interval(),
            nurse: MonitoredResource::with_window_start(param.number_of_nurses(), warm_up),
            arrival_stream: Exponential::exponential(
                param.patient_inter(),
                seed,
                StreamId::INTER_ARRIVAL,
            )?,
            consult_stream: Exponential::exponential(
                param.mean_n_consult_time(),
                seed,
                StreamId::CONSULTATION,
            )?,
            patients: Vec::new(),
            audit: Vec::new(),
            nurse_busy_time: 0.0,
            wait_sum: 0.0,
            wait_count: 0,
            ticks_before: 0,
            ticks_since: 0,
        })
    }

    /// Start the arrival generator and the auditor.
    pub fn start(&mut self, sched: &mut Scheduler<ClinicEvent>) -> ModelResult<()> {
        let gap = self.arrival_stream.sample();
        sched.schedule_in(gap, ClinicEvent::Arrival)?;
        sched.schedule_at(SimTime::ZERO, ClinicEvent::Audit)?;
        Ok(())
    }

    /// Close the resource's integrals at the horizon.
    pub fn finish(&mut self, now: SimTime) {
        self.nurse.flush_tail(now);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn warm_up(&self) -> SimTime {
        self.warm_up
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn nurse(&self) -> &MonitoredResource<PatientId> {
        &self.nurse
    }

    /// All patients, including those who arrived during warm-up.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Patients whose statistics are reported.
    pub fn recorded_patients(&self) -> impl Iterator<Item = &Patient> + '_ {
        let warm_up = self.warm_up;
        self.patients.iter().filter(move |p| p.arrival_time >= warm_up)
    }

    pub fn audit_rows(&self) -> &[IntervalAuditRow] {
        &self.audit
    }

    /// Nurse time overlapping the data-collection window.
    pub fn nurse_busy_time(&self) -> f64 {
        self.nurse_busy_time
    }

    pub fn running_mean_wait(&self) -> f64 {
        if self.wait_count == 0 {
            0.0
        } else {
            self.wait_sum / self.wait_count as f64
        }
    }

    // ── Process steps ─────────────────────────────────────────────────────

    fn patient_mut(&mut self, id: PatientId) -> ModelResult<&mut Patient> {
        id.index()
            .checked_sub(1)
            .and_then(|i| self.patients.get_mut(i))
            .ok_or(ModelError::UnknownPatient(id))
    }

    fn on_arrival(&mut self, sched: &mut Scheduler<ClinicEvent>) -> ModelResult<()> {
        let now = sched.now();
        let id = PatientId(self.patients.len() as u32 + 1);
        let mut patient = Patient::new(id, now);

        patient.stage = PatientStage::Queued;
        if let Request::Granted(id) = self.nurse.request(now, id) {
            sched.schedule_at(now, ClinicEvent::NurseGranted(id))?;
        }
        self.patients.push(patient);

        let gap = self.arrival_stream.sample();
        if now + gap < self.horizon {
            sched.schedule_in(gap, ClinicEvent::Arrival)?;
        }
        Ok(())
    }

    fn on_nurse_granted(
        &mut self,
        id: PatientId,
        sched: &mut Scheduler<ClinicEvent>,
    ) -> ModelResult<()> {
        let now = sched.now();
        let duration = self.consult_stream.sample();
        let (warm_up, horizon) = (self.warm_up, self.horizon);

        let patient = self.patient_mut(id)?;
        patient.stage = PatientStage::InService;
        patient.service_start = Some(now);
        patient.service_duration = Some(duration);

        // Only the part of the consultation inside [warm_up, horizon] counts.
        let busy_from = now.max(warm_up);
        let busy_to = (now + duration).min(horizon);
        self.nurse_busy_time += (busy_to - busy_from).max(0.0);

        sched.schedule_in(duration, ClinicEvent::ConsultationEnd(id))?;
        Ok(())
    }

    fn on_consultation_end(
        &mut self,
        id: PatientId,
        sched: &mut Scheduler<ClinicEvent>,
    ) -> ModelResult<()> {
        let now = sched.now();
        let warm_up = self.warm_up;

        let patient = self.patient_mut(id)?;
        patient.stage = PatientStage::Departed;
        let recorded = patient.arrival_time >= warm_up;
        let wait = patient.queue_time();

        if let (true, Some(wait)) = (recorded, wait) {
            self.wait_sum += wait;
            self.wait_count += 1;
        }

        if let Some(next) = self.nurse.release(now)? {
            sched.schedule_at(now, ClinicEvent::NurseGranted(next))?;
        }
        Ok(())
    }

    fn on_audit(&mut self, sched: &mut Scheduler<ClinicEvent>) -> ModelResult<()> {
        let now = sched.now();
        if now >= self.warm_up {
            self.audit.push(IntervalAuditRow {
                run:                    self.run.0,
                simulation_time:        now.0,
                number_utilised:        self.nurse.in_use(),
                number_available:       self.nurse.capacity(),
                queue_length:           self.nurse.queue_len(),
                utilisation:            self.nurse.instantaneous_utilisation(),
                running_mean_wait_time: self.running_mean_wait(),
            });
        }

        let next = self.next_audit_time(now);
        if next < self.horizon {
            sched.schedule_at(next, ClinicEvent::Audit)?;
        }
        Ok(())
    }

    /// Ticks fall on multiples of the interval from zero until warm-up, then
    /// exactly on the warm-up boundary and on multiples of the interval from
    /// there.  Multiplying instead of accumulating keeps tick times exact.
    fn next_audit_time(&mut self, now: SimTime) -> SimTime {
        if now < self.warm_up {
            self.ticks_before += 1;
            SimTime(self.ticks_before as f64 * self.audit_interval).min(self.warm_up)
        } else {
            self.ticks_since += 1;
            self.warm_up + self.ticks_since as f64 * self.audit_interval
        }
    }
}

impl Model for ClinicModel {
    type Event = ClinicEvent;
    type Error = ModelError;

    fn handle(
        &mut self,
        event: ClinicEvent,
        sched: &mut Scheduler<ClinicEvent>,
    ) -> ModelResult<()> {
        match event {
            ClinicEvent::Arrival => self.on_arrival(sched),
            ClinicEvent::NurseGranted(id) => self.on_nurse_granted(id, sched),
            ClinicEvent::ConsultationEnd(id) => self.on_consultation_end(id, sched),
            ClinicEvent::Audit => self.on_audit(sched),
        }
    }
}

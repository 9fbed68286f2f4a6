//! Background execution of simulation scripts.
//!
//! Each activation gets its own job: a spawned task that replays the script,
//! a cancel channel and an event log. Jobs move one way from `Running` to
//! `Completed` or `Cancelled`. Finished jobs are pruned once they are older
//! than the retention window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use super::{script, SimulationEvent, SimulationKind, Step};

pub type SimulationId = Uuid;

/// Default time a finished job stays queryable.
const DEFAULT_RETENTION: Duration = Duration::from_secs(600);

/// Largest accepted pause multiplier.
pub const MAX_TIME_SCALE: f64 = 100.0;

/// Upper bound on a single scaled pause.
const MAX_PAUSE: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    Running,
    Completed,
    Cancelled,
}

impl SimulationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// How fast scripts play back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationPacing {
    /// Multiplier on every pause. `0.0` skips waiting entirely.
    pub time_scale: f64,
    /// How long finished jobs are kept.
    pub retention: Duration,
}

impl Default for SimulationPacing {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            retention: DEFAULT_RETENTION,
        }
    }
}

impl SimulationPacing {
    /// Pacing with no pauses, for tests and previews.
    pub fn instant() -> Self {
        Self {
            time_scale: 0.0,
            ..Default::default()
        }
    }

    /// Bring a requested multiplier into `0.0..=MAX_TIME_SCALE`. NaN means
    /// original timing.
    pub fn clamp_time_scale(scale: f64) -> f64 {
        if scale.is_nan() {
            1.0
        } else {
            scale.clamp(0.0, MAX_TIME_SCALE)
        }
    }

    /// Wall-clock length of a full run of `kind` at this pacing.
    pub fn expected_duration(&self, kind: SimulationKind) -> Duration {
        script(kind)
            .iter()
            .filter_map(|step| match step {
                Step::Pause(pause) => Some(self.scale(*pause)),
                Step::Emit(_) => None,
            })
            .sum()
    }

    fn scale(&self, pause: Duration) -> Duration {
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(pause.as_secs_f64() * self.time_scale)
            .unwrap_or(MAX_PAUSE)
            .min(MAX_PAUSE)
    }
}

/// Point-in-time view of a job, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub id: SimulationId,
    pub kind: SimulationKind,
    pub state: SimulationState,
    pub started_at: DateTime<Utc>,
    /// Latest progress value, for kinds that report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub events: Vec<SimulationEvent>,
}

impl SimulationSnapshot {
    pub fn success_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::Success { .. }))
            .count()
    }
}

struct Job {
    kind: SimulationKind,
    state: SimulationState,
    started_at: DateTime<Utc>,
    finished_at: Option<Instant>,
    progress: Option<u8>,
    events: Vec<SimulationEvent>,
    cancel: watch::Sender<bool>,
}

impl Job {
    fn snapshot(&self, id: SimulationId) -> SimulationSnapshot {
        SimulationSnapshot {
            id,
            kind: self.kind,
            state: self.state,
            started_at: self.started_at,
            progress: self.progress,
            events: self.events.clone(),
        }
    }

    fn record(&mut self, event: SimulationEvent) {
        if let SimulationEvent::Progress { percent, .. } = &event {
            self.progress = Some(*percent);
        }
        self.events.push(event);
    }

    fn finish(&mut self, state: SimulationState) {
        self.state = state;
        self.finished_at = Some(Instant::now());
    }
}

/// Shared table of simulation jobs.
#[derive(Clone)]
pub struct SimulationRunner {
    jobs: Arc<RwLock<HashMap<SimulationId, Job>>>,
    pacing: SimulationPacing,
}

impl SimulationRunner {
    pub fn new(pacing: SimulationPacing) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            pacing,
        }
    }

    /// Start a new job for `kind` and return its initial snapshot.
    pub async fn start(&self, kind: SimulationKind) -> SimulationSnapshot {
        self.prune().await;

        let id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let job = Job {
            kind,
            state: SimulationState::Running,
            started_at: Utc::now(),
            finished_at: None,
            progress: None,
            events: Vec::new(),
            cancel: cancel_tx,
        };
        let snapshot = job.snapshot(id);

        self.jobs.write().await.insert(id, job);
        tracing::debug!("Simulation {} started ({})", id, kind);

        let runner = self.clone();
        let task = tokio::spawn(async move {
            runner.drive(id, kind, cancel_rx).await;
        });

        // A task that dies must still leave its job in a finished state.
        let runner = self.clone();
        tokio::spawn(async move {
            if let Err(e) = task.await {
                tracing::error!("Simulation {} task failed: {}", id, e);
                runner.abandon(id).await;
            }
        });

        snapshot
    }

    /// Finish a job whose task stopped without reaching the end of its script.
    async fn abandon(&self, id: SimulationId) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            if !job.state.is_finished() {
                job.finish(SimulationState::Cancelled);
            }
        }
    }

    async fn drive(
        &self,
        id: SimulationId,
        kind: SimulationKind,
        mut cancel: watch::Receiver<bool>,
    ) {
        for step in script(kind) {
            match step {
                Step::Pause(pause) => {
                    let pause = self.pacing.scale(pause);
                    if !pause.is_zero() {
                        tokio::select! {
                            _ = tokio::time::sleep(pause) => {}
                            _ = cancel.changed() => {}
                        }
                    }
                    if *cancel.borrow() {
                        tracing::debug!("Simulation {} stopped after cancel", id);
                        return;
                    }
                }
                Step::Emit(event) => {
                    let mut jobs = self.jobs.write().await;
                    let Some(job) = jobs.get_mut(&id) else {
                        return;
                    };
                    if job.state.is_finished() {
                        return;
                    }
                    job.record(event);
                }
            }
        }

        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(&id) {
            if !job.state.is_finished() {
                job.finish(SimulationState::Completed);
                tracing::debug!("Simulation {} completed ({})", id, kind);
            }
        }
    }

    /// Current view of a job, if it exists.
    pub async fn snapshot(&self, id: SimulationId) -> Option<SimulationSnapshot> {
        self.jobs.read().await.get(&id).map(|job| job.snapshot(id))
    }

    /// Cancel a running job. Finished jobs are returned unchanged.
    pub async fn cancel(&self, id: SimulationId) -> Option<SimulationSnapshot> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id)?;
        if !job.state.is_finished() {
            job.finish(SimulationState::Cancelled);
            let _ = job.cancel.send(true);
            tracing::debug!("Simulation {} cancelled", id);
        }
        Some(job.snapshot(id))
    }

    async fn prune(&self) {
        let retention = self.pacing.retention;
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| match job.finished_at {
            Some(at) => at.elapsed() < retention,
            None => true,
        });
        let removed = before - jobs.len();
        if removed > 0 {
            tracing::debug!("Pruned {} finished simulation(s)", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLL: Duration = Duration::from_millis(2);

    /// Poll until the job finishes. `None` if the job is unknown.
    async fn wait(runner: &SimulationRunner, id: SimulationId) -> Option<SimulationSnapshot> {
        loop {
            let snapshot = runner.snapshot(id).await?;
            if snapshot.state.is_finished() {
                return Some(snapshot);
            }
            tokio::time::sleep(POLL).await;
        }
    }

    #[tokio::test]
    async fn test_model_training_runs_to_completion() {
        let runner = SimulationRunner::new(SimulationPacing::instant());
        let started = runner.start(SimulationKind::ModelTraining).await;
        assert_eq!(started.state, SimulationState::Running);

        let done = wait(&runner, started.id).await.unwrap();
        assert_eq!(done.state, SimulationState::Completed);
        assert_eq!(done.progress, Some(100));
        assert_eq!(done.success_count(), 1);

        let percents: Vec<u8> = done
            .events
            .iter()
            .filter_map(|e| match e {
                SimulationEvent::Progress { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, (0..=100).collect::<Vec<u8>>());
    }

    #[tokio::test]
    async fn test_repeated_activations_are_independent() {
        let runner = SimulationRunner::new(SimulationPacing::instant());

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(runner.start(SimulationKind::DashboardLoad).await.id);
        }

        for id in ids {
            let done = wait(&runner, id).await.unwrap();
            assert_eq!(done.state, SimulationState::Completed);
            assert_eq!(done.success_count(), 1);
            assert_eq!(done.events.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_cancel_stops_before_success() {
        let runner = SimulationRunner::new(SimulationPacing::default());
        let started = runner.start(SimulationKind::ResumeDownload).await;

        let cancelled = runner.cancel(started.id).await.unwrap();
        assert_eq!(cancelled.state, SimulationState::Cancelled);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let after = runner.snapshot(started.id).await.unwrap();
        assert_eq!(after.state, SimulationState::Cancelled);
        assert_eq!(after.success_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_finished_job_is_noop() {
        let runner = SimulationRunner::new(SimulationPacing::instant());
        let started = runner.start(SimulationKind::DashboardLoad).await;
        wait(&runner, started.id).await.unwrap();

        let again = runner.cancel(started.id).await.unwrap();
        assert_eq!(again.state, SimulationState::Completed);
        assert_eq!(again.success_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let runner = SimulationRunner::new(SimulationPacing::instant());
        let id = Uuid::new_v4();
        assert!(runner.snapshot(id).await.is_none());
        assert!(runner.cancel(id).await.is_none());
        assert!(wait(&runner, id).await.is_none());
    }

    #[tokio::test]
    async fn test_finished_jobs_are_pruned() {
        let runner = SimulationRunner::new(SimulationPacing {
            time_scale: 0.0,
            retention: Duration::ZERO,
        });
        let first = runner.start(SimulationKind::DashboardLoad).await;
        wait(&runner, first.id).await.unwrap();

        let second = runner.start(SimulationKind::DashboardLoad).await;
        assert!(runner.snapshot(first.id).await.is_none());
        assert!(runner.snapshot(second.id).await.is_some());
    }

    #[test]
    fn test_scale() {
        let pacing = SimulationPacing {
            time_scale: 0.5,
            ..Default::default()
        };
        assert_eq!(
            pacing.scale(Duration::from_millis(1000)),
            Duration::from_millis(500)
        );
        let broken = SimulationPacing {
            time_scale: f64::NAN,
            ..Default::default()
        };
        assert_eq!(broken.scale(Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn test_huge_scale_is_bounded() {
        let pacing = SimulationPacing {
            time_scale: 1e20,
            ..Default::default()
        };
        assert_eq!(pacing.scale(Duration::from_secs(2)), MAX_PAUSE);
        assert_eq!(
            pacing.expected_duration(SimulationKind::DashboardLoad),
            MAX_PAUSE
        );
    }

    #[test]
    fn test_clamp_time_scale() {
        assert_eq!(SimulationPacing::clamp_time_scale(0.5), 0.5);
        assert_eq!(SimulationPacing::clamp_time_scale(1e20), MAX_TIME_SCALE);
        assert_eq!(SimulationPacing::clamp_time_scale(f64::INFINITY), MAX_TIME_SCALE);
        assert_eq!(SimulationPacing::clamp_time_scale(-3.0), 0.0);
        assert_eq!(SimulationPacing::clamp_time_scale(f64::NAN), 1.0);
    }

    #[tokio::test]
    async fn test_huge_scale_job_stays_cancellable() {
        let runner = SimulationRunner::new(SimulationPacing {
            time_scale: 1e20,
            ..Default::default()
        });
        let started = runner.start(SimulationKind::DashboardLoad).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        let running = runner.snapshot(started.id).await.unwrap();
        assert_eq!(running.state, SimulationState::Running);
        assert_eq!(running.events.len(), 1);

        runner.cancel(started.id).await.unwrap();
        let done = wait(&runner, started.id).await.unwrap();
        assert_eq!(done.state, SimulationState::Cancelled);
        assert_eq!(done.success_count(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_job_is_finished() {
        let runner = SimulationRunner::new(SimulationPacing::default());
        let started = runner.start(SimulationKind::ResumeDownload).await;

        runner.abandon(started.id).await;
        let after = runner.snapshot(started.id).await.unwrap();
        assert_eq!(after.state, SimulationState::Cancelled);

        let instant = SimulationRunner::new(SimulationPacing::instant());
        let finished = instant.start(SimulationKind::DashboardLoad).await;
        wait(&instant, finished.id).await.unwrap();
        instant.abandon(finished.id).await;
        let still = instant.snapshot(finished.id).await.unwrap();
        assert_eq!(still.state, SimulationState::Completed);
    }
}

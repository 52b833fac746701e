use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};

/// Result type for scheduler job execution.
pub type JobResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Trait for defining a scheduled job.
///
/// Jobs are executed periodically by the [`SchedulerService`]. Errors are
/// logged but never stop the schedule.
#[async_trait]
pub trait SchedulerJob: Send + Sync {
    /// Returns the unique name of this job.
    ///
    /// Used for logging and identification purposes.
    fn name(&self) -> &'static str;

    /// Returns the interval between job executions.
    fn interval(&self) -> Duration;

    /// Whether the first tick waits for the next wall-clock multiple of the
    /// interval. A 30 minute aligned job fires at :00 and :30 rather than
    /// relative to process start.
    fn align_to_wall_clock(&self) -> bool {
        false
    }

    /// Executes the job logic.
    async fn execute(&self) -> JobResult;
}

/// Runs registered jobs on their configured cadence.
///
/// Each job gets its own timer task. The job body runs inline in its tick
/// loop with [`tokio::time::MissedTickBehavior::Skip`], so one job's runs
/// never overlap: a tick arriving while the previous run is still in
/// flight is dropped, not queued.
#[derive(Default)]
pub struct SchedulerService {
    jobs: Vec<Arc<dyn SchedulerJob>>,
}

impl SchedulerService {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    pub fn with_job(mut self, job: impl SchedulerJob + 'static) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    /// Spawn the timer tasks for all registered jobs.
    pub fn start(&self) {
        tracing::info!("Scheduler started with {} job(s)", self.jobs.len());

        for job in &self.jobs {
            let job = Arc::clone(job);
            tokio::spawn(async move {
                let interval = job.interval();

                if job.align_to_wall_clock() {
                    let delay = delay_to_next_boundary(Utc::now(), interval);
                    tracing::debug!(
                        "Job '{}' waiting {}s for its first aligned tick",
                        job.name(),
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }

                let mut timer = tokio::time::interval(interval);
                timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

                loop {
                    timer.tick().await;
                    if let Err(e) = job.execute().await {
                        tracing::error!("Job '{}' execution error: {}", job.name(), e);
                    }
                }
            });
        }
    }
}

/// Delay until the next wall-clock multiple of `interval`, measured from
/// midnight UTC. A 30 minute interval yields the next :00 or :30; exactly
/// on a boundary the delay is zero.
fn delay_to_next_boundary(now: DateTime<Utc>, interval: Duration) -> Duration {
    let interval_secs = interval.as_secs().max(1);
    let secs_today = u64::from(now.num_seconds_from_midnight());
    let past_boundary = secs_today % interval_secs;
    Duration::from_secs((interval_secs - past_boundary) % interval_secs)
}

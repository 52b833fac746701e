use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::notifier::Notifier;
use crate::scheduler::{JobResult, SchedulerJob};
use crate::traits::ChatGateway;

/// Announcement cadence, aligned to the half hour.
const ANNOUNCE_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Scheduled job that runs one announce cycle every half hour.
pub struct AnnounceJob {
    notifier: Arc<Notifier>,
    gateway: Arc<dyn ChatGateway>,
}

impl AnnounceJob {
    pub fn new(notifier: Arc<Notifier>, gateway: Arc<dyn ChatGateway>) -> Self {
        Self { notifier, gateway }
    }
}

#[async_trait]
impl SchedulerJob for AnnounceJob {
    fn name(&self) -> &'static str {
        "MovieAnnounce"
    }

    fn interval(&self) -> Duration {
        ANNOUNCE_INTERVAL
    }

    fn align_to_wall_clock(&self) -> bool {
        true
    }

    async fn execute(&self) -> JobResult {
        self.notifier.announce_cycle(self.gateway.as_ref()).await;
        Ok(())
    }
}

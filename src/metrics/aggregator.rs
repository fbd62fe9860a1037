use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult, MetricsError};

use super::render::render_report;
use super::store::CookieStore;
use super::types::{AnalyticsSettings, Observation};

/// Only report and quit commands flow here.
const CONTROL_QUEUE_CAPACITY: usize = 8;

/// Messages consumed by the aggregation task besides observations.
enum ControlCommand {
    Report {
        respond_to: oneshot::Sender<String>,
    },
    Quit,
}

/// Handle to a running aggregation pipeline.
///
/// `submit` may be called from any number of concurrent producers; the
/// store behind the handle is touched only by the aggregation task.
pub struct CookieAnalytics {
    observations: mpsc::Sender<Observation>,
    control: mpsc::Sender<ControlCommand>,
    worker: JoinHandle<CookieStore>,
    shedding: AtomicBool,
}

/// Spawn the aggregation task and return its handle.
///
/// # Errors
///
/// Returns an error if the exchange-wide histograms cannot be created.
pub fn setup_cookie_analytics(settings: AnalyticsSettings) -> AppResult<CookieAnalytics> {
    let store = CookieStore::new()?;
    let (observation_tx, observation_rx) = mpsc::channel(settings.queue_capacity.get());
    let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE_CAPACITY);

    let worker = tokio::spawn(run_aggregation(store, observation_rx, control_rx));

    Ok(CookieAnalytics {
        observations: observation_tx,
        control: control_tx,
        worker,
        shedding: AtomicBool::new(false),
    })
}

impl CookieAnalytics {
    /// Hand one observation to the aggregation task without blocking.
    ///
    /// Sits on the capture hot path: when the queue is full the observation
    /// is dropped and aggregate freshness degrades instead of the producer
    /// stalling. The drop warning fires once per saturation episode.
    pub fn submit(&self, observation: Observation) {
        match self.observations.try_send(observation) {
            Ok(()) => {
                self.shedding.store(false, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                if !self.shedding.swap(true, Ordering::Relaxed) {
                    tracing::warn!("Observation queue full; dropping cookie metrics.");
                }
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                if !self.shedding.swap(true, Ordering::Relaxed) {
                    tracing::warn!("Aggregation task stopped; dropping cookie metrics.");
                }
            }
        }
    }

    /// Submit one observation, waiting for queue capacity.
    ///
    /// For cooperative producers such as file replay, where shedding load
    /// would silently skew the report. Capture-path callers use
    /// [`CookieAnalytics::submit`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation task has stopped.
    pub async fn feed(&self, observation: Observation) -> AppResult<()> {
        self.observations
            .send(observation)
            .await
            .map_err(|_send_error| AppError::metrics(MetricsError::PipelineStopped))
    }

    /// Render the current report.
    ///
    /// Reflects every observation drained before the command reached the
    /// task; observations submitted concurrently may or may not be
    /// included.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation task has stopped.
    pub async fn report(&self) -> AppResult<String> {
        let (respond_to, response) = oneshot::channel();
        self.control
            .send(ControlCommand::Report { respond_to })
            .await
            .map_err(|_send_error| AppError::metrics(MetricsError::PipelineStopped))?;
        response
            .await
            .map_err(|_recv_error| AppError::metrics(MetricsError::PipelineStopped))
    }

    /// Stop the aggregation task and take over its store.
    ///
    /// Returns only after every previously accepted observation is
    /// reflected in the store and the task has exited.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation task panicked or was aborted.
    pub async fn shutdown(self) -> AppResult<CookieStore> {
        // A closed control channel means the task is already gone; joining
        // below still observes its exit.
        drop(self.control.send(ControlCommand::Quit).await);
        Ok(self.worker.await?)
    }
}

async fn run_aggregation(
    mut store: CookieStore,
    mut observations: mpsc::Receiver<Observation>,
    mut control: mpsc::Receiver<ControlCommand>,
) -> CookieStore {
    let mut observations_open = true;
    loop {
        // Biased toward the data queue: a control command is handled only
        // after every observation enqueued ahead of it has been drained.
        tokio::select! {
            biased;
            maybe_observation = observations.recv(), if observations_open => {
                match maybe_observation {
                    Some(observation) => store.record(&observation),
                    None => observations_open = false,
                }
            }
            maybe_command = control.recv() => {
                match maybe_command {
                    Some(ControlCommand::Report { respond_to }) => {
                        drop(respond_to.send(render_report(&store)));
                    }
                    Some(ControlCommand::Quit) | None => {
                        drain_observations(&mut observations, &mut store);
                        break;
                    }
                }
            }
        }
    }
    store
}

/// Fold everything still queued into the store before the task exits.
fn drain_observations(observations: &mut mpsc::Receiver<Observation>, store: &mut CookieStore) {
    while let Ok(observation) = observations.try_recv() {
        store.record(&observation);
    }
}

//! Asynchronous task polling.
//!
//! Deploy-style actions answer with an acknowledgement carrying a link to
//! a task the server works on. [`TaskMonitor`] re-fetches that task at a
//! fixed interval until it reaches a terminal state, then delivers exactly
//! one callback. Two watches never share state; no call implicitly waits
//! on another.
//!
//! # Example
//!
//! ```rust,ignore
//! let monitor = TaskMonitor::new(client.clone());
//! let handle = monitor.watch(task, callbacks(
//!     |task| println!("deployed: {:?}", task.task_id),
//!     |task| eprintln!("deploy failed: {:?}", task.task_id),
//! ))?;
//! handle.wait().await;
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::clients::{ApiClient, HttpMethod};
use crate::rest::binder::QueryOptions;
use crate::rest::errors::ApiError;
use crate::rest::link::{rels, RestLink};
use crate::rest::operation::{BinderSpec, RemoteOperation};
use crate::rest::representation::Representation;

/// Server-side state of an asynchronous task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Queued, not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Terminal: completed as requested.
    FinishedSuccessfully,
    /// Terminal: completed with an error.
    FinishedUnsuccessfully,
    /// Terminal: cancelled server-side.
    Aborted,
}

impl TaskState {
    /// Whether no further state change can happen.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::FinishedSuccessfully | Self::FinishedUnsuccessfully | Self::Aborted
        )
    }

    /// Whether the task finished as requested.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::FinishedSuccessfully)
    }
}

/// Wire representation of an asynchronous task.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "task", default)]
pub struct TaskDto {
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    /// Epoch seconds of the last state change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for TaskDto {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.task+xml";
    const NAME: &'static str = "Task";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

/// Wire representation of a task collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "tasks", default)]
pub struct TasksDto {
    #[serde(rename = "task")]
    collection: Vec<TaskDto>,
}

impl crate::rest::representation::ResourceCollection for TasksDto {
    type Item = TaskDto;
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.tasks+xml";

    fn into_items(self) -> Vec<TaskDto> {
        self.collection
    }
}

/// Acknowledgement returned by deploy-style actions, carrying a `status`
/// link to the task the server queued.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename = "acceptedrequest", default)]
pub struct AcceptedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,
}

impl Representation for AcceptedRequest {
    const MEDIA_TYPE: &'static str = "application/vnd.abiquo.acceptedrequest+xml";
    const NAME: &'static str = "AcceptedRequest";

    fn links(&self) -> &[RestLink] {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Vec<RestLink> {
        &mut self.links
    }
}

impl AcceptedRequest {
    /// The link to the queued task.
    pub fn status_link(&self) -> Result<&RestLink, crate::rest::LinkError> {
        self.require_link(rels::STATUS)
    }

    /// Fetches the queued task once.
    pub async fn task(&self, client: &ApiClient) -> Result<Option<TaskDto>, ApiError> {
        let link = self.status_link()?;
        client
            .follow::<TaskDto>(&TASK_REFRESH, link, &QueryOptions::new())
            .await
    }
}

/// Re-fetches a task through its `self` link. 303 means the server
/// already reaped the task and maps to absence.
pub const TASK_REFRESH: RemoteOperation = RemoteOperation {
    name: "task.refresh",
    method: HttpMethod::Get,
    binder: BinderSpec::Link { rel: rels::SELF },
    accept: TaskDto::MEDIA_TYPE,
    absent_on: &[303, 404],
};

/// Outcome receiver for a watched task. Consumed by value, so delivery
/// happens at most once by construction.
pub trait TaskCallback: Send + 'static {
    /// The task reached `FINISHED_SUCCESSFULLY`.
    fn on_success(self, task: TaskDto);
    /// The task reached a terminal non-success state.
    fn on_failure(self, task: TaskDto);
}

/// Builds a [`TaskCallback`] from two closures.
pub fn callbacks<S, F>(on_success: S, on_failure: F) -> impl TaskCallback
where
    S: FnOnce(TaskDto) + Send + 'static,
    F: FnOnce(TaskDto) + Send + 'static,
{
    struct FnCallbacks<S, F> {
        success: S,
        failure: F,
    }

    impl<S, F> TaskCallback for FnCallbacks<S, F>
    where
        S: FnOnce(TaskDto) + Send + 'static,
        F: FnOnce(TaskDto) + Send + 'static,
    {
        fn on_success(self, task: TaskDto) {
            (self.success)(task);
        }

        fn on_failure(self, task: TaskDto) {
            (self.failure)(task);
        }
    }

    FnCallbacks {
        success: on_success,
        failure: on_failure,
    }
}

/// Polls tasks at a fixed interval until they reach a terminal state.
#[derive(Clone, Debug)]
pub struct TaskMonitor {
    client: ApiClient,
    interval: Duration,
}

impl TaskMonitor {
    /// Creates a monitor using the configured poll interval.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let interval = client.config().poll_interval();
        Self { client, interval }
    }

    /// Overrides the poll interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Watches one task until terminal, then delivers exactly one of
    /// `on_success`/`on_failure` on the spawned polling task.
    ///
    /// A 303 on the refresh means the server already reaped the task:
    /// polling stops and the outcome is judged from the last known state.
    ///
    /// # Errors
    ///
    /// Fails with [`LinkError::MissingLink`](crate::rest::LinkError::MissingLink)
    /// when the task carries no `self` link; nothing is spawned then.
    pub fn watch<C: TaskCallback>(
        &self,
        task: TaskDto,
        callback: C,
    ) -> Result<MonitorHandle, ApiError> {
        let link = task.require_link(rels::SELF)?.clone();
        let client = self.client.clone();
        let interval = self.interval;
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            let mut last = task;
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        tracing::debug!(task = ?last.task_id, "task watch cancelled");
                        return;
                    }
                    _ = ticker.tick() => {}
                }

                match client
                    .follow::<TaskDto>(&TASK_REFRESH, &link, &QueryOptions::new())
                    .await
                {
                    Ok(Some(fresh)) => {
                        last = fresh;
                        if last.state.is_some_and(|state| state.is_terminal()) {
                            break;
                        }
                    }
                    // Reaped before we saw a terminal state.
                    Ok(None) => break,
                    Err(error) => {
                        tracing::warn!(%error, "task refresh failed, still polling");
                    }
                }
            }

            if last.state.is_some_and(|state| state.is_success()) {
                callback.on_success(last);
            } else {
                callback.on_failure(last);
            }
        });

        Ok(MonitorHandle {
            cancel: Some(cancel_tx),
            join: Some(join),
        })
    }
}

/// Handle to one watched task.
#[derive(Debug)]
pub struct MonitorHandle {
    cancel: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stops future polls. No callback is delivered after this; if the
    /// terminal callback already ran, this is a no-op.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Waits for the polling task to finish (terminal delivery or
    /// cancellation).
    pub async fn wait(mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

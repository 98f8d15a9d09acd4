//! The submission-and-poll controller.
//!
//! One [`Controller`] owns one page and runs at most one job at a time.
//! Submitting cancels whatever poll task the previous submission left
//! running, then starts the job, spawns a new poll task, and renders the
//! result (or the failure) into the page when the task finishes.

use std::sync::Arc;

use summarizer_core::markup::sanitize_summary;
use summarizer_core::types::SessionId;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::backend::JobBackend;
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::form::FormData;
use crate::page::{Page, PageElements};
use crate::poller::{poll_until_complete, PollConfig};

/// Observable lifecycle of the current submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Waiting for the job-start response.
    Submitting,
    Polling { session_id: SessionId },
    Done { summary: String },
    Failed { message: String },
    Cancelled,
}

impl Phase {
    /// True once nothing is in flight.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Phase::Submitting | Phase::Polling { .. })
    }
}

/// Page plus the bookkeeping that must change atomically with it.
struct Shared {
    page: Page,
    /// Bumped by every submit and cancel; stale tasks compare against it.
    generation: u64,
    active: Option<CancellationToken>,
}

/// Drives one form: submits it, polls the job, and renders the outcome
/// into the page.
pub struct Controller<B> {
    backend: Arc<B>,
    shared: Arc<Mutex<Shared>>,
    phase: Arc<watch::Sender<Phase>>,
    elements: Arc<PageElements>,
    poll: PollConfig,
}

impl<B: JobBackend + 'static> Controller<B> {
    /// Bind a controller to `page`, whose elements are named by `elements`.
    ///
    /// Fails if any of the five elements is absent from the page.
    pub fn new(
        backend: B,
        page: Page,
        elements: PageElements,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        page.require(&elements)?;
        let (phase, _) = watch::channel(Phase::Idle);
        Ok(Self {
            backend: Arc::new(backend),
            shared: Arc::new(Mutex::new(Shared {
                page,
                generation: 0,
                active: None,
            })),
            phase: Arc::new(phase),
            elements: Arc::new(elements),
            poll: PollConfig {
                interval: config.poll_interval,
                max_wait: config.max_wait,
            },
        })
    }

    /// The backend this controller talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase.borrow().clone()
    }

    /// Receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Snapshot of the page as currently rendered.
    pub async fn page(&self) -> Page {
        self.shared.lock().await.page.clone()
    }

    /// Handle a form submission.
    ///
    /// The loading state is rendered before the start request goes out.
    /// On success returns the session id once the poll task is running;
    /// call [`wait`](Self::wait) to await the outcome.
    pub async fn submit(&self, form: FormData) -> Result<SessionId, ClientError> {
        let generation = {
            let mut shared = self.shared.lock().await;
            if let Some(previous) = shared.active.take() {
                tracing::info!("Superseding in-flight submission");
                previous.cancel();
            }
            shared.generation += 1;

            let el = &self.elements;
            shared.page.error = None;
            shared.page.show(&el.spinner);
            shared.page.set_inner_html(&el.output, "");
            shared.page.hide(&el.download_section);
            self.phase.send_replace(Phase::Submitting);
            shared.generation
        };

        tracing::debug!(fields = form.fields().len(), has_file = form.file_part().is_some(), "Submitting form");

        let started = self.backend.start(&form).await;

        let mut shared = self.shared.lock().await;
        if shared.generation != generation {
            return Err(ClientError::Superseded);
        }

        let session_id = match started {
            Ok(resp) => resp.session_id,
            Err(e) => {
                tracing::error!(error = %e, "Failed to start summarization");
                render_failure(&mut shared.page, &self.elements, &e);
                self.phase.send_replace(Phase::Failed {
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        tracing::info!(session_id = %session_id, "Summarization started");

        let cancel = CancellationToken::new();
        shared.active = Some(cancel.clone());
        self.phase.send_replace(Phase::Polling {
            session_id: session_id.clone(),
        });
        drop(shared);

        tokio::spawn(run_poll_task(
            Arc::clone(&self.backend),
            Arc::clone(&self.shared),
            Arc::clone(&self.phase),
            Arc::clone(&self.elements),
            self.poll,
            session_id.clone(),
            generation,
            cancel,
        ));

        Ok(session_id)
    }

    /// Stop the current poll task, if any, and leave the loading state.
    ///
    /// A submission whose start request is still in flight is abandoned
    /// too: its `submit` call returns [`ClientError::Superseded`].
    pub async fn cancel(&self) {
        let mut shared = self.shared.lock().await;
        let submitting = matches!(*self.phase.borrow(), Phase::Submitting);
        let active = shared.active.take();
        if active.is_none() && !submitting {
            return;
        }
        if let Some(token) = active {
            token.cancel();
        }
        shared.generation += 1;
        shared.page.hide(&self.elements.spinner);
        self.phase.send_replace(Phase::Cancelled);
        tracing::info!("Polling cancelled");
    }

    /// Wait until the current submission settles and return the final phase.
    pub async fn wait(&self) -> Phase {
        let mut rx = self.phase.subscribe();
        let settled = match rx.wait_for(Phase::is_settled).await {
            Ok(phase) => phase.clone(),
            Err(_) => self.phase(),
        };
        settled
    }
}

impl<B> Drop for Controller<B> {
    /// Page teardown: stop polling deterministically.
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_lock() {
            if let Some(token) = shared.active.take() {
                token.cancel();
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_poll_task<B: JobBackend>(
    backend: Arc<B>,
    shared: Arc<Mutex<Shared>>,
    phase: Arc<watch::Sender<Phase>>,
    elements: Arc<PageElements>,
    poll: PollConfig,
    session_id: SessionId,
    generation: u64,
    cancel: CancellationToken,
) {
    let outcome = poll_until_complete(backend.as_ref(), &session_id, poll, &cancel).await;

    let mut shared = shared.lock().await;
    if shared.generation != generation {
        return;
    }
    shared.active = None;

    match outcome {
        Ok(Some(snapshot)) => {
            let page = &mut shared.page;
            page.hide(&elements.spinner);
            page.set_inner_html(&elements.output, sanitize_summary(&snapshot.summary));
            page.set_value(&elements.result_field, snapshot.summary.clone());
            page.show(&elements.download_section);
            phase.send_replace(Phase::Done {
                summary: snapshot.summary,
            });
        }
        Ok(None) => {
            phase.send_replace(Phase::Cancelled);
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Polling failed");
            render_failure(&mut shared.page, &elements, &e);
            phase.send_replace(Phase::Failed {
                message: e.to_string(),
            });
        }
    }
}

fn render_failure(page: &mut Page, elements: &PageElements, error: &ApiError) {
    page.hide(&elements.spinner);
    page.error = Some(error.to_string());
}

//! Submission lifecycle controller.
//!
//! Owns the single outstanding request task. Submissions arrive stamped
//! with the UI's staleness token and settled outcomes carry the same token
//! back; the UI drops any event whose token is no longer current, so a
//! slow response can never overwrite a view the user already cleared.
//! Invalidate aborts the outstanding task, leaving a reset form
//! immediately ready for a fresh submission.

use crate::engine::{PredictEngine, SubmitError};
use crate::model::{AppEvent, Mode, Prediction, ServiceConfig, SubmitRequest};
use crate::normalize;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers to drive the submission lifecycle.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    /// Submit a validated payload stamped with the UI's current token.
    Submit { request: SubmitRequest, token: u64 },
    /// Reset or mode switch happened; abort any in-flight request.
    Invalidate,
    Quit,
}

/// Handle for the running request task.
struct InFlight {
    token: u64,
    mode: Mode,
    handle: Option<tokio::task::JoinHandle<Result<Prediction, SubmitError>>>,
}

pub(crate) async fn run_controller(
    cfg: &ServiceConfig,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let engine = Arc::new(PredictEngine::new(cfg)?);
    let mut in_flight: Option<InFlight> = None;

    loop {
        tokio::select! {
            // Commands already queued take priority over a completed request,
            // so an Invalidate issued before the resolution always wins.
            biased;
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit { request, token }) => {
                        if in_flight.is_some() {
                            // The UI disables the trigger while Pending; a
                            // submit that races through anyway is dropped.
                            let _ = event_tx
                                .send(AppEvent::Info("Analysis already in progress".into()));
                            continue;
                        }
                        let mode = request.mode();
                        let engine = engine.clone();
                        let handle =
                            tokio::spawn(async move { engine.run(&request).await });
                        let _ = event_tx.send(AppEvent::SubmissionStarted { token, mode });
                        in_flight = Some(InFlight {
                            token,
                            mode,
                            handle: Some(handle),
                        });
                    }
                    Some(UiCommand::Invalidate) => {
                        // The stale request is dead to the UI either way;
                        // aborting it frees the slot for the next submission
                        // instead of holding it until the timeout.
                        if let Some(fl) = in_flight.take() {
                            if let Some(h) = fl.handle {
                                h.abort();
                            }
                        }
                    }
                    Some(UiCommand::Quit) | None => break,
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it
            // can be dropped if another select branch is chosen, and we'll
            // never observe completion.
            maybe_done = async {
                if let Some(fl) = in_flight.as_mut() {
                    if let Some(h) = fl.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                let Some(join_res) = maybe_done else { continue };
                let Some(fl) = in_flight.take() else { continue };
                let outcome = match join_res {
                    Ok(Ok(prediction)) => Ok(prediction),
                    Ok(Err(e)) => Err(normalize::error_message(fl.mode, &e)),
                    Err(_) => Err(fl.mode.generic_error().to_string()),
                };
                let _ = event_tx.send(AppEvent::SubmissionSettled {
                    token: fl.token,
                    mode: fl.mode,
                    outcome,
                });
            }
        }
    }

    Ok(())
}

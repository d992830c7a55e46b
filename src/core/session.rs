use crate::core::controller::{Dispatch, FormController, FormEvent};
use crate::domain::model::ValidationReport;
use crate::domain::ports::{FormView, Transport};
use crate::utils::error::{FormError, Result};

#[derive(Debug)]
pub enum SubmitResult {
    Accepted,
    Rejected(FormError),
    Invalid(ValidationReport),
    /// Another submission was still in flight.
    Ignored,
}

/// Drives a controller against a transport.
///
/// `submit` borrows the session for the whole request, so events cannot be
/// dispatched through it while a request is pending. Hosts that need that
/// drive [`FormController`] directly: `Submit`, then the outcome event.
pub struct FormSession<V: FormView, T: Transport> {
    controller: FormController<V>,
    transport: T,
}

/// Abandons the submission if the request future is dropped before an
/// outcome reaches the controller.
struct PendingSubmission<'a, V: FormView> {
    controller: &'a mut FormController<V>,
    settled: bool,
}

impl<'a, V: FormView> PendingSubmission<'a, V> {
    fn new(controller: &'a mut FormController<V>) -> Self {
        Self {
            controller,
            settled: false,
        }
    }

    fn settle(&mut self, outcome: FormEvent) -> Result<Dispatch> {
        self.settled = true;
        self.controller.handle(outcome)
    }
}

impl<V: FormView> Drop for PendingSubmission<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon_submission();
        }
    }
}

impl<V: FormView, T: Transport> FormSession<V, T> {
    pub fn new(controller: FormController<V>, transport: T) -> Self {
        Self {
            controller,
            transport,
        }
    }

    pub fn controller(&self) -> &FormController<V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController<V> {
        &mut self.controller
    }

    pub fn dispatch(&mut self, event: FormEvent) -> Result<Dispatch> {
        self.controller.handle(event)
    }

    /// Validates, sends once and routes the single outcome back into the
    /// controller. Dropping the returned future mid-request releases the
    /// in-flight flag without showing an overlay.
    pub async fn submit(&mut self) -> Result<SubmitResult> {
        let payload = match self.controller.handle(FormEvent::Submit)? {
            Dispatch::Send(payload) => payload,
            Dispatch::Invalid(report) => return Ok(SubmitResult::Invalid(report)),
            Dispatch::Handled | Dispatch::Ignored => return Ok(SubmitResult::Ignored),
        };

        let method = self.controller.settings().method;
        tracing::debug!("Sending listing via {}", method.as_str());

        let mut pending = PendingSubmission::new(&mut self.controller);
        match self.transport.send(method, &payload).await {
            Ok(()) => {
                pending.settle(FormEvent::SubmissionSucceeded)?;
                Ok(SubmitResult::Accepted)
            }
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                pending.settle(FormEvent::SubmissionFailed)?;
                Ok(SubmitResult::Rejected(e))
            }
        }
    }

    pub fn into_controller(self) -> FormController<V> {
        self.controller
    }
}

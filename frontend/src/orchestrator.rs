use crate::acquire::{ImageFile, Rejection, SelectedImage};
use crate::config::AppConfig;
use crate::connectivity::ConnectivityStatus;
use crate::error::ApiError;
use shared::PredictionResult;

pub const NO_IMAGE_MESSAGE: &str = "Select an image first";

/// Identifies one dispatched prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A request the caller must now send, exactly once.
#[derive(Debug, PartialEq)]
pub struct Dispatch<T> {
    pub ticket: Ticket,
    pub image: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    /// `superseded` is set when the user picks another image while the
    /// request is still out; its answer is then thrown away.
    Submitting { ticket: Ticket, superseded: bool },
    Failed(String),
    Predicted(PredictionResult),
}

/// Everything the view needs, derived from the orchestrator and its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiState<'a> {
    pub has_image: bool,
    pub connected: bool,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub result: Option<&'a PredictionResult>,
}

impl UiState<'_> {
    /// The predict control is only live with an image and nothing in flight.
    pub fn predict_enabled(&self) -> bool {
        self.has_image && !self.loading
    }
}

/// Select → submit → result/error state machine. Transitions happen only
/// through `select_image`, `submit` and `complete`.
#[derive(Debug)]
pub struct Orchestrator {
    phase: Phase,
    next_ticket: u64,
    disconnected_message: String,
}

impl Orchestrator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            phase: Phase::Idle,
            next_ticket: 0,
            disconnected_message: format!(
                "Backend is not connected. Make sure the classification service is running at {}",
                config.api_base
            ),
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            Phase::Predicted(result) => Some(result),
            _ => None,
        }
    }

    pub fn ui_state(&self, has_image: bool, status: ConnectivityStatus) -> UiState<'_> {
        UiState {
            has_image,
            connected: status.is_connected(),
            loading: self.is_loading(),
            error: self.error(),
            result: self.result(),
        }
    }

    /// A new image was accepted. Any shown error or result goes away; an
    /// outstanding request keeps the trigger disabled until it settles.
    pub fn select_image(&mut self) {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Submitting { ticket, .. } => Phase::Submitting {
                ticket,
                superseded: true,
            },
            _ => Phase::Idle,
        };
    }

    /// Reacts to the acquirer's answer. Only an accepted image clears the
    /// outcome; a rejection passes through without touching it.
    pub fn take_selection<F: ImageFile, P>(
        &mut self,
        offered: Result<&SelectedImage<F, P>, Rejection>,
    ) -> Result<(), Rejection> {
        let selected = offered?;
        log::debug!("New {} selection, clearing outcome", selected.kind.media_type());
        self.select_image();
        Ok(())
    }

    /// Runs the guards and, if they pass, enters `Submitting` and hands back
    /// the request to send. `None` means no network call may be made.
    pub fn submit<T>(&mut self, image: Option<T>, status: ConnectivityStatus) -> Option<Dispatch<T>> {
        if self.is_loading() {
            log::debug!("Ignoring submit while a prediction is in flight");
            return None;
        }

        let Some(image) = image else {
            self.phase = Phase::Failed(NO_IMAGE_MESSAGE.to_string());
            return None;
        };

        if !status.is_connected() {
            self.phase = Phase::Failed(self.disconnected_message.clone());
            return None;
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.phase = Phase::Submitting {
            ticket,
            superseded: false,
        };

        Some(Dispatch { ticket, image })
    }

    /// Settles the request identified by `ticket`. Every outcome leaves
    /// `Submitting`. Returns whether the state changed.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<PredictionResult, ApiError>) -> bool {
        let superseded = match self.phase {
            Phase::Submitting { ticket: current, superseded } if current == ticket => superseded,
            _ => {
                log::warn!("Dropping completion for unknown request {:?}", ticket);
                return false;
            }
        };

        self.phase = match outcome {
            _ if superseded => {
                log::info!("Discarding prediction for a replaced image");
                Phase::Idle
            }
            Ok(result) => {
                log::info!("Predicted {} ({})", result.emotion, result.headline());
                Phase::Predicted(result)
            }
            Err(e) => {
                log::error!("Prediction failed: {}", e);
                Phase::Failed(e.user_message())
            }
        };

        true
    }
}

mod acquire;
mod api;
mod components;
mod config;
mod connectivity;
mod error;
mod orchestrator;

use acquire::{ImageSource, InputAcquirer, Rejection, SelectedImage};
use config::AppConfig;
use connectivity::ConnectivityStatus;
use error::ApiError;
use gloo_file::{File as GlooFile, ObjectUrl};
use orchestrator::{Dispatch, Orchestrator, Ticket};
use shared::PredictionResult;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

// Yew msg components
enum Msg {
    // Connectivity
    StatusChecked(ConnectivityStatus),

    // Input events
    FileChosen(Option<GlooFile>),
    FileDropped(Option<GlooFile>),
    DragEnter,
    DragLeave,

    // Prediction
    Predict,
    PredictionFinished(Ticket, Result<PredictionResult, ApiError>),
}

// Main component
struct Model {
    config: AppConfig,
    status: ConnectivityStatus,
    input: InputAcquirer<GlooFile, ObjectUrl>,
    orchestrator: Orchestrator,
}

fn make_preview(file: &GlooFile) -> ObjectUrl {
    ObjectUrl::from(file.clone())
}

fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.alert_with_message(message) {
                log::error!("Failed to show alert: {:?}", e);
            }
        }
        None => log::error!("No window to alert on: {}", message),
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = AppConfig::from_env();
        log::info!("Using backend at {}", config.api_base);

        let link = ctx.link().clone();
        let probe_config = config.clone();
        spawn_local(async move {
            let status = connectivity::check_status(&probe_config).await;
            link.send_message(Msg::StatusChecked(status));
        });

        Self {
            orchestrator: Orchestrator::new(&config),
            config,
            status: ConnectivityStatus::default(),
            input: InputAcquirer::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StatusChecked(status) => {
                log::info!("Backend status: {:?}", status);
                self.status = status;
                true
            }

            Msg::FileChosen(file) => {
                let offered = self.input.offer(file, ImageSource::Chosen, make_preview);
                let outcome = self.orchestrator.take_selection(offered);
                self.handle_offer(outcome)
            }
            Msg::FileDropped(file) => {
                let offered = self.input.drop_file(file, make_preview);
                let outcome = self.orchestrator.take_selection(offered);
                self.handle_offer(outcome);
                true
            }
            Msg::DragEnter => {
                let was_dragging = self.input.is_dragging();
                self.input.drag_enter();
                was_dragging != self.input.is_dragging()
            }
            Msg::DragLeave => {
                let was_dragging = self.input.is_dragging();
                self.input.drag_leave();
                was_dragging != self.input.is_dragging()
            }

            Msg::Predict => self.handle_predict(ctx),
            Msg::PredictionFinished(ticket, outcome) => self.orchestrator.complete(ticket, outcome),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let ui = self.orchestrator.ui_state(self.input.has_image(), self.status);

        html! {
            <div class="app">
                { components::header::render_header(ConnectivityStatus::from(ui.connected)) }

                <main class="container">
                    { components::upload_section::render_upload_section(self, ctx) }
                    { components::utils::render_error_message(ui.error) }
                    { components::preview_area::render_predict_button(&ui, ctx) }
                    { components::results::render_results(ui.result) }
                </main>

                <footer class="footer">
                    <p>{"MoodKewan © 2025 | Animal emotion prediction with AI"}</p>
                </footer>
            </div>
        }
    }
}

// Handler methods
impl Model {
    fn handle_offer(&self, outcome: Result<(), Rejection>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(rejection) => {
                log::warn!("Rejected image: {}", rejection);
                alert(rejection.alert_message());
                false
            }
        }
    }

    fn handle_predict(&mut self, ctx: &Context<Self>) -> bool {
        let image = self.input.current().map(|selected| selected.file.clone());

        if let Some(dispatch) = self.orchestrator.submit(image, self.status) {
            self.send_prediction_request(ctx, dispatch);
        }

        true
    }

    fn send_prediction_request(&self, ctx: &Context<Self>, dispatch: Dispatch<GlooFile>) {
        let link = ctx.link().clone();
        let config = self.config.clone();
        let Dispatch { ticket, image } = dispatch;

        spawn_local(async move {
            log::info!("Sending {} for prediction", image.name());
            let outcome = api::predict(&config, &image).await;
            link.send_message(Msg::PredictionFinished(ticket, outcome));
        });
    }

    fn selected(&self) -> Option<&SelectedImage<GlooFile, ObjectUrl>> {
        self.input.current()
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

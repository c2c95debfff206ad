use super::super::{Model, Msg};
use super::utils::{debounce, open_file_picker};
use crate::orchestrator::UiState;
use yew::prelude::*;

pub fn render_preview(model: &Model) -> Html {
    let Some(selected) = model.selected() else {
        return html! {};
    };
    let name = selected.file.name();

    html! {
        <div class="preview">
            <img src={selected.preview.to_string()} alt={name.clone()} title={name} />
            <button class="change-btn" onclick={debounce(300, open_file_picker)}>
                {"Change image"}
            </button>
        </div>
    }
}

pub fn render_predict_button(ui: &UiState<'_>, ctx: &Context<Model>) -> Html {
    if !ui.has_image {
        return html! {};
    }

    html! {
        <button
            class="predict-btn"
            onclick={ctx.link().callback(|_| Msg::Predict)}
            disabled={!ui.predict_enabled()}
        >
            { if ui.loading { "Predicting..." } else { "Predict Emotion" } }
        </button>
    }
}

use crate::connectivity::ConnectivityStatus;
use yew::prelude::*;

/// Renders the application header with the backend status badge
pub fn render_header(status: ConnectivityStatus) -> Html {
    html! {
        <header class="header">
            <h1>{"🐾 MoodKewan"}</h1>
            <p>{"Detect your pet's emotion with AI"}</p>
            <div class={classes!("status", status.css_class())}>
                { status.label() }
            </div>
        </header>
    }
}

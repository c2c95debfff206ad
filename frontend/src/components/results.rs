use shared::{Emotion, FALLBACK_COLOR, PredictionResult, ScoreRow};
use yew::prelude::*;

fn emoji(emotion: Option<Emotion>) -> &'static str {
    emotion.map(Emotion::emoji).unwrap_or("")
}

fn color(emotion: Option<Emotion>) -> &'static str {
    emotion.map(Emotion::color).unwrap_or(FALLBACK_COLOR)
}

pub fn render_results(result: Option<&PredictionResult>) -> Html {
    let Some(result) = result else {
        return html! {};
    };

    let emotion = result.emotion_label();
    let confidence = result.headline();
    let rows = result.score_rows();

    html! {
        <div class="result-container">
            <div class="main-result">
                <div class="emoji-display">{ emoji(emotion) }</div>
                <h2 class="emotion-title">{ &result.emotion }</h2>

                <div class="confidence-display">
                    <span class="confidence-label">{"Confidence:"}</span>
                    <span class="confidence-value">{ confidence.to_string() }</span>
                </div>

                <div class="confidence-bar">
                    <div
                        class="confidence-fill"
                        style={format!("width: {}%; background-color: {};", confidence.bar_width(), color(emotion))}
                    ></div>
                </div>
            </div>

            <div class="all-scores">
                <h3>{"All Predictions:"}</h3>
                <div class="scores-grid">
                    { for rows.iter().map(render_score_row) }
                </div>
            </div>
        </div>
    }
}

fn render_score_row(row: &ScoreRow) -> Html {
    html! {
        <div class="score-item" key={row.label.clone()}>
            <div class="score-header">
                <span class="score-emoji">{ emoji(row.emotion) }</span>
                <span class="score-name">{ &row.label }</span>
            </div>

            <div class="score-bar">
                <div
                    class="score-fill"
                    style={format!("width: {}%; background-color: {};", row.percent.bar_width(), color(row.emotion))}
                ></div>
            </div>

            <span class="score-percentage">{ format!("{:.1}%", row.percent.value()) }</span>
        </div>
    }
}

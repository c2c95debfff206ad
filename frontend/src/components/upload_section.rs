use super::super::Model;
use super::super::Msg;
use super::preview_area::render_preview;
use super::utils::{debounce, first_file, open_file_picker, FILE_INPUT_ID};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = first_file(input.files());

        // Lets the same file be picked again.
        input.set_value("");

        Msg::FileChosen(file)
    });

    let handle_drag_enter = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::DragEnter
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::DragLeave
    });

    // Needed so the browser treats the zone as a drop target.
    let handle_drag_over = Callback::from(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
    });

    let handle_drop = link.callback(|e: DragEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::FileDropped(first_file(e.data_transfer().and_then(|dt| dt.files())))
    });

    let has_image = model.input.has_image();

    html! {
        <div class="uploader-container">
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!(
                    "upload-area",
                    model.input.is_dragging().then_some("dragging"),
                    has_image.then_some("has-image")
                )}
                onclick={debounce(300, open_file_picker)}
                ondragenter={handle_drag_enter}
                ondragleave={handle_drag_leave}
                ondragover={handle_drag_over}
                ondrop={handle_drop}
            >
                {
                    if has_image {
                        render_preview(model)
                    } else {
                        html! {
                            <div class="upload-content">
                                <div class="upload-icon">{"⬆"}</div>
                                <h3>{"Choose or drag an animal photo"}</h3>
                                <p>{"Supported: JPG, PNG, GIF"}</p>
                            </div>
                        }
                    }
                }
            </div>
        </div>
    }
}

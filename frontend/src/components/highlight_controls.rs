use dioxus::prelude::*;

const INPUT_STYLE: &str = "
    border: 1px solid rgba(101, 101, 101, 0.8);
    border-radius: 9999px;
    padding: 6px 14px;
    font-size: 18px;
    outline: none;
    width: 200px;
";

#[component]
pub fn HighlightControls(mut cover_term: Signal<String>, mut tag_term: Signal<String>, status: ReadSignal<String>) -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                padding: 16px;
                border-bottom: 1px solid #E5E7EB;
            ",
            label {
                "Overlay "
                input {
                    r#type: "text",
                    style: INPUT_STYLE,
                    value: "{cover_term}",
                    oninput: move |event: Event<FormData>| cover_term.set(event.value()),
                }
            }
            label {
                "Tag "
                input {
                    r#type: "text",
                    style: INPUT_STYLE,
                    value: "{tag_term}",
                    oninput: move |event: Event<FormData>| tag_term.set(event.value()),
                }
            }
            span {
                style: "color: #6B7280;",
                "{status}"
            }
        }
    }
}

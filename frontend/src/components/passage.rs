use dioxus::prelude::*;

/// Id of the container whose paragraphs get highlighted.
pub const PASSAGE_ID: &str = "content";

#[component]
pub fn Passage() -> Element {
    rsx! {
        div {
            id: PASSAGE_ID,
            style: "max-width: 640px; margin: 24px; font-size: 18px; line-height: 23px;",
            p { "生命是一条河流，人生是河上的一次航行。" }
            p {
                "有人说人"
                span { "生如梦" }
                "，也有人说生"
                b { "命如歌" }
                "。"
            }
            p {
                " "
                span { "人生的意义，" }
                "在于"
                i { "让生" }
                "命发出光来。"
            }
            p {
                "每一段生命都有它的长度，每一段人生都有它的宽度。长度无法选择，宽度却握在自己手里：读书、远行、相爱、犯错，"
                "然后在某个清晨忽然明白，生命并不需要被证明，人生也不必被比较。"
            }
        }
    }
}

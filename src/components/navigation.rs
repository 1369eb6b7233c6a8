use crate::Screen;
use dioxus::prelude::*;

const ACTIVE: &str = "flex: 1; padding: 12px; margin: 0 5px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; text-align: center; background: #0066cc; color: #ffffff;";
const INACTIVE: &str = "flex: 1; padding: 12px; margin: 0 5px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; text-align: center; background: #ffffff; color: #333;";

#[component]
pub fn NavigationBar(current_screen: Screen, on_navigate: EventHandler<Screen>) -> Element {
    // The detail view belongs to the gallery tab
    let in_gallery = matches!(current_screen, Screen::Gallery | Screen::ImageDetail(_));
    let in_camera = matches!(current_screen, Screen::Camera);

    rsx! {
        div {
            style: "display: flex; justify-content: space-around; padding: 10px; background: #f0f0f0; border-top: 1px solid #ddd;",

            button {
                style: if in_gallery { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::Gallery),
                "🖼️ Gallery"
            }

            button {
                style: if in_camera { ACTIVE } else { INACTIVE },
                onclick: move |_| on_navigate.call(Screen::Camera),
                "📷 Camera"
            }
        }
    }
}

use crate::{Screen, ServicesHandle};
use dioxus::prelude::*;

#[component]
pub fn SplashScreen(on_navigate: EventHandler<Screen>) -> Element {
    let services = use_context::<ServicesHandle>();
    let mut status = use_signal(|| "Starting...".to_string());
    let mut failed = use_signal(|| false);

    // Initialize the store once, then hand over to the gallery
    use_effect(move || {
        let services = services.clone();
        spawn(async move {
            let services = match services {
                Ok(services) => services,
                Err(msg) => {
                    status.set(msg);
                    failed.set(true);
                    return;
                }
            };

            match services.initialize() {
                Ok(count) => {
                    log::info!("Gallery ready with {} images", count);
                    status.set(format!("{} photos", count));
                    tokio::time::sleep(services.splash_duration()).await;
                    on_navigate.call(Screen::Gallery);
                }
                Err(e) if e.is_fatal() => {
                    log::error!("Error initializing database: {}", e);
                    status.set(e.user_message());
                    failed.set(true);
                }
                Err(e) => {
                    log::warn!("Could not count images: {}", e);
                    on_navigate.call(Screen::Gallery);
                }
            }
        });
    });

    rsx! {
        div { style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; background: #0066cc; color: #ffffff; padding: 24px; box-sizing: border-box;",
            div { style: "font-size: 72px; margin-bottom: 16px;", "🗺️" }
            h1 { style: "margin: 0 0 8px 0; font-size: 28px; font-weight: 700;", "Geotag Gallery" }
            p { style: "margin: 0; font-size: 14px; opacity: 0.85;", "Photos and where you took them" }

            if failed() {
                div { class: "card", style: "margin-top: 32px; color: #a00; text-align: center;",
                    "❌ {status}"
                }
            } else {
                p { style: "margin-top: 32px; font-size: 13px; opacity: 0.7;", "{status}" }
            }
        }
    }
}

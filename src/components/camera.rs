use crate::{Screen, ServicesHandle};
use dioxus::prelude::*;
use photo_gallery::CaptureMode;

#[component]
pub fn CameraScreen(on_navigate: EventHandler<Screen>) -> Element {
    let services = use_context::<ServicesHandle>();
    let busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let camera_permission = use_signal(|| match &services {
        Ok(services) => services.has_camera_permission(),
        Err(_) => false,
    });

    let camera_services = services.clone();
    let library_services = services;

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #0066cc; margin: 0 0 16px 0; padding-top: 8px; font-size: 24px; font-weight: 700;",
                "📷 Camera"
            }

            div { class: "card",
                p { style: "margin: 0 0 16px 0; font-size: 14px; color: #555;",
                    "New photos are tagged with your current position and the name of the place."
                }
                if !camera_permission() {
                    p { style: "margin: 0 0 16px 0; font-size: 13px; color: #a60;",
                        "⚠️ Camera access has not been granted yet. You will be asked when taking a photo."
                    }
                }
                div { style: "display: flex; flex-direction: column; gap: 12px;",
                    button {
                        class: "btn-primary",
                        disabled: busy(),
                        onclick: move |_| {
                            run_capture(
                                camera_services.clone(),
                                CaptureMode::Camera,
                                busy,
                                error,
                                on_navigate,
                            )
                        },
                        if busy() { "⏳ Processing..." } else { "📷 Take photo" }
                    }
                    button {
                        class: "btn-secondary",
                        disabled: busy(),
                        onclick: move |_| {
                            run_capture(
                                library_services.clone(),
                                CaptureMode::Library,
                                busy,
                                error,
                                on_navigate,
                            )
                        },
                        "🖼️ Choose from library"
                    }
                }
            }

            if let Some(message) = error() {
                div { class: "modal-backdrop",
                    div { class: "card",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px; color: #a00;", "Error" }
                        p { style: "margin: 0 0 16px 0; font-size: 14px; color: #333;", "{message}" }
                        button {
                            class: "btn-primary",
                            style: "width: 100%;",
                            onclick: move |_| error.set(None),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

fn run_capture(
    services: ServicesHandle,
    mode: CaptureMode,
    mut busy: Signal<bool>,
    mut error: Signal<Option<String>>,
    on_navigate: EventHandler<Screen>,
) {
    if busy() {
        return;
    }
    let services = match services {
        Ok(services) => services,
        Err(msg) => {
            error.set(Some(msg));
            return;
        }
    };

    busy.set(true);
    error.set(None);
    spawn(async move {
        let result = services.capture(mode).await;
        busy.set(false);
        match result {
            Ok(_) => on_navigate.call(Screen::Gallery),
            Err(e) if e.is_silent() => log::info!("Capture cancelled"),
            Err(e) => {
                log::error!("Error processing image: {}", e);
                error.set(Some(e.user_message()));
            }
        }
    });
}

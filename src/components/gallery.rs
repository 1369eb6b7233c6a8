use crate::{Screen, ServicesHandle};
use dioxus::prelude::*;
use photo_gallery::{load_preview, ImageRecord};

#[component]
pub fn GalleryScreen(on_navigate: EventHandler<Screen>) -> Element {
    let services = use_context::<ServicesHandle>();
    let mut images = use_signal(Vec::<ImageRecord>::new);
    let mut search_filter = use_signal(String::new);
    let mut load_error = use_signal(String::new);

    let preview_size = match &services {
        Ok(services) => services.preview_size(),
        Err(_) => 256,
    };

    // Reloads whenever the search text changes
    use_effect(move || {
        let query = search_filter();
        match &services {
            Ok(services) => match services.list(&query) {
                Ok(list) => {
                    images.set(list);
                    load_error.set(String::new());
                }
                Err(e) => {
                    log::error!("Failed to load images: {}", e);
                    load_error.set(e.user_message());
                }
            },
            Err(msg) => load_error.set(msg.clone()),
        }
    });

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            // Header
            div { style: "display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 12px; padding-top: 8px;",
                h1 { style: "color: #0066cc; margin: 0; font-size: 24px; font-weight: 700;",
                    "🖼️ Gallery"
                }
                span { style: "font-size: 13px; color: #666;",
                    "{images().len()} photos"
                }
            }

            input {
                r#type: "search",
                placeholder: "Search by place...",
                value: "{search_filter}",
                style: "width: 100%; box-sizing: border-box; padding: 12px; font-size: 16px; border: 1px solid #ddd; border-radius: 8px; margin-bottom: 12px;",
                oninput: move |e| search_filter.set(e.value()),
            }

            if !load_error().is_empty() {
                div { class: "card", style: "color: #a00;", "⚠️ {load_error}" }
            }

            if images().is_empty() && load_error().is_empty() {
                div { class: "card", style: "text-align: center; color: #666;",
                    if search_filter().trim().is_empty() {
                        p { style: "margin: 0 0 12px 0;", "No photos yet." }
                        button {
                            class: "btn-primary",
                            onclick: move |_| on_navigate.call(Screen::Camera),
                            "📷 Take the first one"
                        }
                    } else {
                        p { style: "margin: 0;", "No photos taken at \"{search_filter}\"." }
                    }
                }
            } else {
                div { class: "gallery-grid",
                    for image in images() {
                        GalleryTile {
                            key: "{image.id}",
                            record: image.clone(),
                            preview_size,
                            on_open: move |id| on_navigate.call(Screen::ImageDetail(id)),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GalleryTile(record: ImageRecord, preview_size: u32, on_open: EventHandler<i64>) -> Element {
    let id = record.id;
    let path = record.path();
    let preview = use_resource(move || {
        let path = path.clone();
        async move {
            let result = load_preview(path, preview_size).await;
            if let Err(e) = &result {
                log::warn!("No preview for image {}: {}", id, e);
            }
            result
        }
    });

    rsx! {
        div {
            class: "gallery-tile",
            onclick: move |_| on_open.call(id),

            match &*preview.read() {
                Some(Ok(data_url)) => rsx! {
                    img { src: "{data_url}", alt: "{record.location}" }
                },
                Some(Err(_)) => rsx! {
                    div { style: "display: flex; align-items: center; justify-content: center; height: 100%; font-size: 32px; color: #999;", "🖼️" }
                },
                None => rsx! {
                    div { style: "display: flex; align-items: center; justify-content: center; height: 100%; color: #999;", "⏳" }
                },
            }

            div { class: "tile-label", "{record.location}" }
        }
    }
}

use crate::error::AppError;
use crate::{Screen, ServicesHandle};
use chrono::{Local, NaiveDateTime};
use dioxus::prelude::*;
use photo_gallery::{original_data_url, Coordinates, ImageRecord};

/// Half the width of the embedded map, in degrees
const MAP_SPAN: f64 = 0.005;

#[component]
pub fn ImageDetailScreen(image_id: i64, on_navigate: EventHandler<Screen>) -> Element {
    let services = use_context::<ServicesHandle>();
    let mut record = use_signal(|| None::<ImageRecord>);
    let mut image_url = use_signal(|| None::<String>);
    let mut file_size = use_signal(|| None::<u64>);
    let mut error = use_signal(String::new);
    let mut confirm_delete = use_signal(|| false);
    let mut fullscreen = use_signal(|| false);

    let load_services = services.clone();
    use_effect(move || {
        let services = match &load_services {
            Ok(services) => services,
            Err(msg) => {
                error.set(msg.clone());
                return;
            }
        };

        match services.get(image_id) {
            Ok(r) => {
                let path = r.path();
                file_size.set(std::fs::metadata(&path).ok().map(|m| m.len()));
                match original_data_url(&path) {
                    Ok(url) => image_url.set(Some(url)),
                    Err(e) => {
                        log::warn!("Could not load image {}: {}", image_id, e);
                        error.set(AppError::from(e).user_message());
                    }
                }
                record.set(Some(r));
            }
            Err(e) => {
                log::error!("Failed to load image {}: {}", image_id, e);
                error.set(e.user_message());
            }
        }
    });

    let delete_services = services;
    let on_delete = move |_: MouseEvent| {
        confirm_delete.set(false);
        let Ok(services) = &delete_services else {
            return;
        };
        match services.delete(image_id) {
            Ok(true) => {
                log::info!("Image {} deleted", image_id);
                on_navigate.call(Screen::Gallery);
            }
            Ok(false) => error.set("Could not delete the image".to_string()),
            Err(e) => {
                log::error!("Error deleting image {}: {}", image_id, e);
                error.set(e.user_message());
            }
        }
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            // Header
            div { style: "display: flex; align-items: center; gap: 12px; margin-bottom: 12px; padding-top: 8px;",
                button {
                    class: "btn-secondary",
                    style: "padding: 8px 12px;",
                    onclick: move |_| on_navigate.call(Screen::Gallery),
                    "← Back"
                }
                h1 { style: "color: #0066cc; margin: 0; font-size: 20px; font-weight: 700;",
                    "Photo"
                }
            }

            if !error().is_empty() {
                div { class: "card", style: "color: #a00;", "⚠️ {error}" }
            }

            if let Some(url) = image_url() {
                div {
                    style: "border-radius: 12px; overflow: hidden; background: #000; margin-bottom: 12px; cursor: zoom-in;",
                    onclick: move |_| fullscreen.set(true),
                    img { src: "{url}", style: "width: 100%; display: block; object-fit: contain; max-height: 60vh;" }
                }
            }

            if let Some(r) = record() {
                div { class: "card",
                    DetailRow { label: "📍 Place", value: r.location.clone() }
                    DetailRow { label: "🧭 Coordinates", value: format_coordinates(&r) }
                    DetailRow { label: "🕒 Taken", value: format_local_timestamp(&r.timestamp) }
                    DetailRow {
                        label: "💾 Size",
                        value: file_size().map(format_file_size).unwrap_or_else(|| "-".to_string()),
                    }
                }

                if let Some(coordinates) = r.coordinates {
                    div { class: "card", style: "padding: 0; overflow: hidden;",
                        iframe {
                            src: map_embed_url(&coordinates),
                            title: "Map",
                            style: "width: 100%; height: 250px; border: none; display: block;",
                        }
                        a {
                            href: map_link_url(&coordinates),
                            target: "_blank",
                            style: "display: block; padding: 10px 16px; font-size: 13px; color: #0066cc; text-decoration: none;",
                            "🗺️ Open in OpenStreetMap"
                        }
                    }
                }

                button {
                    class: "btn-danger",
                    style: "width: 100%; margin-bottom: 16px;",
                    onclick: move |_| confirm_delete.set(true),
                    "🗑️ Delete photo"
                }
            }

            if fullscreen() {
                if let Some(url) = image_url() {
                    div {
                        style: "position: fixed; inset: 0; background: #000; z-index: 200; display: flex; align-items: center; justify-content: center; cursor: zoom-out;",
                        onclick: move |_| fullscreen.set(false),
                        img { src: "{url}", style: "max-width: 100%; max-height: 100%; object-fit: contain;" }
                    }
                }
            }

            if confirm_delete() {
                div { class: "modal-backdrop",
                    div { class: "card",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px;", "Delete photo?" }
                        p { style: "margin: 0 0 8px 0; font-size: 14px; color: #555;",
                            "The photo and its file will be removed. This cannot be undone."
                        }
                        if let Some(r) = record() {
                            div { style: "margin: 0 0 16px 0; padding: 8px 12px; background: #f8f9fa; border-radius: 8px; font-size: 13px; color: #333;",
                                for line in delete_details(&r, file_size()) {
                                    p { style: "margin: 4px 0;", "{line}" }
                                }
                            }
                        }
                        div { style: "display: flex; gap: 8px;",
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| confirm_delete.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn-danger",
                                style: "flex: 1;",
                                onclick: on_delete,
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailRow(label: &'static str, value: String) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; gap: 12px; padding: 8px 0; border-bottom: 1px solid #eee; font-size: 14px;",
            span { style: "color: #666;", "{label}" }
            span { style: "color: #333; text-align: right;", "{value}" }
        }
    }
}

/// Latitude and longitude to 4 decimals, or a dash when unknown
fn format_coordinates(record: &ImageRecord) -> String {
    match &record.coordinates {
        Some(c) => c.display_short(),
        None => "-".to_string(),
    }
}

/// Summary shown in the delete confirmation
fn delete_details(record: &ImageRecord, size: Option<u64>) -> Vec<String> {
    let location = match &record.coordinates {
        Some(c) => format!(
            "Location: Latitude: {:.4}, Longitude: {:.4}",
            c.latitude, c.longitude
        ),
        None => "Location: Location data not available".to_string(),
    };
    vec![
        location,
        format!("Taken on: {}", format_local_timestamp(&record.timestamp)),
        format!(
            "Size: {}",
            size.map(format_file_size)
                .unwrap_or_else(|| "Unknown".to_string())
        ),
    ]
}

fn map_embed_url(c: &Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.5},{:.5},{:.5},{:.5}&layer=mapnik&marker={:.5},{:.5}",
        c.longitude - MAP_SPAN,
        c.latitude - MAP_SPAN,
        c.longitude + MAP_SPAN,
        c.latitude + MAP_SPAN,
        c.latitude,
        c.longitude
    )
}

fn map_link_url(c: &Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={:.5}&mlon={:.5}#map=16/{:.5}/{:.5}",
        c.latitude, c.longitude, c.latitude, c.longitude
    )
}

/// Stored timestamps are UTC
fn format_local_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp
        .and_utc()
        .with_timezone(&Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}

fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

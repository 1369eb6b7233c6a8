use dioxus::prelude::*;
use std::rc::Rc;

mod components;
mod config;
mod error;
mod filesystem;
mod services;

use components::{CameraScreen, GalleryScreen, ImageDetailScreen, NavigationBar, SplashScreen};
use config::AppConfig;
use services::GalleryServices;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("geotag-gallery"),
    );

    #[cfg(not(target_os = "android"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

/// Screen-Navigation for the app
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Splash,
    Gallery,
    Camera,
    ImageDetail(i64),
}

/// Opened services, or the message of why they could not be opened
pub type ServicesHandle = Result<Rc<GalleryServices>, String>;

#[component]
fn App() -> Element {
    let mut current_screen = use_signal(|| Screen::Splash);

    use_context_provider(|| -> ServicesHandle {
        let data_dir = filesystem::get_app_data_dir();
        let config = AppConfig::load(&data_dir);
        log::info!("App data directory: {}", data_dir.display());

        GalleryServices::open(&config, &data_dir)
            .map(Rc::new)
            .map_err(|e| {
                log::error!("Error opening database: {}", e);
                e.user_message()
            })
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { class: "app-shell",

            // Main Content
            div { style: "flex: 1; overflow-y: auto;",
                match current_screen() {
                    Screen::Splash => rsx! {
                        SplashScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Gallery => rsx! {
                        GalleryScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::Camera => rsx! {
                        CameraScreen { on_navigate: move |s| current_screen.set(s) }
                    },
                    Screen::ImageDetail(id) => rsx! {
                        ImageDetailScreen { image_id: id, on_navigate: move |s| current_screen.set(s) }
                    },
                }
            }

            if current_screen() != Screen::Splash {
                NavigationBar {
                    current_screen: current_screen(),
                    on_navigate: move |screen| current_screen.set(screen),
                }
            }
        }
    }
}

mod camera;
mod gallery;
mod image_detail;
mod navigation;
mod splash;

pub use camera::CameraScreen;
pub use gallery::GalleryScreen;
pub use image_detail::ImageDetailScreen;
pub use navigation::NavigationBar;
pub use splash::SplashScreen;

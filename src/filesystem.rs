use std::path::PathBuf;

#[cfg(target_os = "android")]
use jni::objects::{JObject, JString};
#[cfg(target_os = "android")]
use ndk_context::android_context;

/// Package directories tried when the activity context cannot be reached
#[cfg(target_os = "android")]
const ANDROID_FALLBACK_DIRS: [&str; 2] = [
    "/data/user/0/com.geotaggallery.app/files",
    "/data/data/com.geotaggallery.app/files",
];

/// App data directory: database, settings and imported photos live here
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_files_dir() {
            return dir;
        }
        log::warn!("getFilesDir unavailable, trying known package paths");
        ANDROID_FALLBACK_DIRS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .unwrap_or_else(|| PathBuf::from("/data/local/tmp/geotag-gallery"))
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

#[cfg(target_os = "android")]
fn android_files_dir() -> Option<PathBuf> {
    let ctx = android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }.ok()?;
    let mut env = vm.attach_current_thread().ok()?;
    let activity = unsafe { JObject::from_raw(ctx.context().cast()) };

    let files_dir = env
        .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
        .ok()?
        .l()
        .ok()?;
    let abs_path = env
        .call_method(files_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .ok()?
        .l()
        .ok()?;
    let abs_path: String = env.get_string(&JString::from(abs_path)).ok()?.into();

    Some(PathBuf::from(abs_path))
}

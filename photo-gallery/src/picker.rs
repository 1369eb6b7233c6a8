// Platform-specific camera, gallery and location access
//
// On Android the work is delegated to the app's MainActivity over JNI: the
// activity launches the system intent and stores the result in static fields
// which are polled from here. On other platforms every call returns
// `PlatformNotSupported`.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Configuration for the platform bridge on Android
#[derive(Debug, Clone, PartialEq)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
    /// How many 100ms polls to wait for the activity's result
    pub poll_attempts: u32,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
            poll_attempts: 600,
        }
    }
}

/// Parses the "lat,lon" string the activity reports
pub fn parse_location_result(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.trim().split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

#[cfg(target_os = "android")]
mod android {
    use super::*;
    use jni::objects::{JClass, JObject, JString, JValue};
    use jni::JNIEnv;
    use ndk_context::android_context;

    fn jni_err(what: &str) -> impl Fn(jni::errors::Error) -> PickerError + '_ {
        move |e| PickerError::Other(format!("{} failed: {}", what, e))
    }

    fn app_class_loader<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
        let at_cls = env
            .find_class("android/app/ActivityThread")
            .map_err(jni_err("find ActivityThread"))?;
        let at = env
            .call_static_method(
                &at_cls,
                "currentActivityThread",
                "()Landroid/app/ActivityThread;",
                &[],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("currentActivityThread"))?;

        let app = env
            .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getApplication"))?;

        let context = if app.is_null() {
            env.call_method(&at, "getSystemContext", "()Landroid/app/ContextImpl;", &[])
                .and_then(|v| v.l())
                .map_err(jni_err("getSystemContext"))?
        } else {
            app
        };

        env.call_method(&context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getClassLoader"))
    }

    fn load_class<'a>(
        env: &mut JNIEnv<'a>,
        loader: &JObject<'a>,
        fq_slash: &str,
    ) -> Result<JClass<'a>, PickerError> {
        let name: JString = env
            .new_string(fq_slash.replace('/', "."))
            .map_err(jni_err("new_string"))?;
        let cls = env
            .call_method(
                loader,
                "loadClass",
                "(Ljava/lang/String;)Ljava/lang/Class;",
                &[JValue::Object(&JObject::from(name))],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("ClassLoader.loadClass"))?;
        Ok(JClass::from(cls))
    }

    fn activity_instance<'a>(
        env: &mut JNIEnv<'a>,
        config: &AndroidPickerConfig,
    ) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
        let loader = app_class_loader(env)?;
        let cls = load_class(env, &loader, &config.main_activity_class)?;
        let signature = format!("()L{};", config.main_activity_class);

        let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
            Ok(val) => val.l().map_err(jni_err("getInstance"))?,
            Err(_) => {
                if env.exception_check().unwrap_or(false) {
                    let _ = env.exception_clear();
                }
                // Kotlin companion objects expose the accessor one level down
                let comp_signature = format!("L{}$Companion;", config.main_activity_class);
                let companion = env
                    .get_static_field(&cls, "Companion", &comp_signature)
                    .and_then(|v| v.l())
                    .map_err(jni_err("Companion field"))?;
                if companion.is_null() {
                    return Err(PickerError::Other(
                        "MainActivity.Companion is null".to_string(),
                    ));
                }
                env.call_method(&companion, "getInstance", &signature, &[])
                    .and_then(|v| v.l())
                    .map_err(jni_err("Companion.getInstance"))?
            }
        };

        if instance.is_null() {
            return Err(PickerError::Other(
                "MainActivity instance is null - Activity not initialized?".to_string(),
            ));
        }

        Ok((instance, cls))
    }

    fn static_string<'a>(
        env: &mut JNIEnv<'a>,
        cls: &JClass<'a>,
        getter: &str,
    ) -> Result<Option<String>, PickerError> {
        let obj = match env
            .call_static_method(cls, getter, "()Ljava/lang/String;", &[])
            .and_then(|v| v.l())
        {
            Ok(obj) if !obj.is_null() => obj,
            _ => return Ok(None),
        };
        let value: String = env
            .get_string(&JString::from(obj))
            .map_err(jni_err("String conversion"))?
            .into();
        Ok(Some(value))
    }

    /// Calls `launcher` on the activity and polls `result_getter` until a value,
    /// an error or the timeout arrives.
    pub(super) fn launch_and_wait(
        config: &AndroidPickerConfig,
        launcher: &str,
        result_getter: &str,
    ) -> Result<String, PickerError> {
        let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
        let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_err("JavaVM"))?;
        let mut env = vm.attach_current_thread().map_err(jni_err("JNI attach"))?;

        let (activity, main_cls) = activity_instance(&mut env, config)?;

        env.call_static_method(&main_cls, "clearLastError", "()V", &[])
            .map_err(jni_err("clearLastError"))?;
        env.call_method(&activity, launcher, "()V", &[])
            .map_err(jni_err(launcher))?;

        for _ in 0..config.poll_attempts {
            std::thread::sleep(std::time::Duration::from_millis(100));

            if let Some(value) = static_string(&mut env, &main_cls, result_getter)? {
                return Ok(value);
            }
            if let Some(err) = static_string(&mut env, &main_cls, "getLastError")? {
                return Err(classify_activity_error(err));
            }
        }

        Err(PickerError::Timeout(format!("{} - no result", launcher)))
    }

    pub(super) fn call_bool(config: &AndroidPickerConfig, method: &str) -> Result<bool, PickerError> {
        let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
        let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_err("JavaVM"))?;
        let mut env = vm.attach_current_thread().map_err(jni_err("JNI attach"))?;

        let (activity, _cls) = activity_instance(&mut env, config)?;
        env.call_method(&activity, method, "()Z", &[])
            .and_then(|v| v.z())
            .map_err(jni_err(method))
    }

    fn classify_activity_error(err: String) -> PickerError {
        let lower = err.to_lowercase();
        if lower.contains("cancel") {
            PickerError::Cancelled(err)
        } else if lower.contains("permission") {
            PickerError::PermissionDenied(err)
        } else {
            PickerError::Other(err)
        }
    }
}

/// Pick a single image from the gallery. Blocks for up to a minute.
#[cfg(target_os = "android")]
pub fn pick_image_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    android::launch_and_wait(config, "launchImagePicker", "getLastPhotoPath").map(PathBuf::from)
}

/// Capture a photo with the camera. Blocks for up to a minute.
#[cfg(target_os = "android")]
pub fn capture_photo_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    android::launch_and_wait(config, "launchCamera", "getLastPhotoPath").map(PathBuf::from)
}

#[cfg(target_os = "android")]
pub fn has_camera_permission_with_config(
    config: &AndroidPickerConfig,
) -> Result<bool, PickerError> {
    android::call_bool(config, "hasCameraPermission")
}

/// Current device position as reported by the activity's location provider
#[cfg(target_os = "android")]
pub fn current_location_with_config(
    config: &AndroidPickerConfig,
) -> Result<Option<(f64, f64)>, PickerError> {
    if !android::call_bool(config, "hasLocationPermission")? {
        return Ok(None);
    }
    let raw = android::launch_and_wait(config, "requestCurrentLocation", "getLastLocation")?;
    Ok(parse_location_result(&raw))
}

#[cfg(not(target_os = "android"))]
pub fn pick_image_with_config(_config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Image picker not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo_with_config(_config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn has_camera_permission_with_config(
    _config: &AndroidPickerConfig,
) -> Result<bool, PickerError> {
    Ok(false)
}

#[cfg(not(target_os = "android"))]
pub fn current_location_with_config(
    _config: &AndroidPickerConfig,
) -> Result<Option<(f64, f64)>, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Location service not available on this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_result() {
        assert_eq!(
            parse_location_result("48.8566,2.3522"),
            Some((48.8566, 2.3522))
        );
        assert_eq!(
            parse_location_result(" -33.86 , 151.21 "),
            Some((-33.86, 151.21))
        );
        assert_eq!(parse_location_result("48.8566"), None);
        assert_eq!(parse_location_result("north,east"), None);
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_desktop_reports_unsupported() {
        let config = AndroidPickerConfig::default();
        assert!(matches!(
            capture_photo_with_config(&config),
            Err(PickerError::PlatformNotSupported(_))
        ));
        assert!(matches!(
            pick_image_with_config(&config),
            Err(PickerError::PlatformNotSupported(_))
        ));
        assert_eq!(has_camera_permission_with_config(&config), Ok(false));
    }
}

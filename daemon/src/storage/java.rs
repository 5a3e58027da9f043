use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};

pub const JAVA_NAME: &str = "java";

#[cfg(windows)]
const JAVA_FILE: &str = "java.exe";
#[cfg(not(windows))]
const JAVA_FILE: &str = "java";

#[cfg(windows)]
const COMMON_JAVA_PATHS: &[&str] = &[
    "C:\\Program Files\\Java\\jdk-21\\bin\\java.exe",
    "C:\\Program Files\\Java\\jdk-17\\bin\\java.exe",
    "C:\\Program Files\\Java\\jre-21\\bin\\java.exe",
    "C:\\Program Files\\Java\\jre-17\\bin\\java.exe",
    "C:\\Program Files\\Eclipse Adoptium\\jdk-21\\bin\\java.exe",
];
#[cfg(not(windows))]
const COMMON_JAVA_PATHS: &[&str] = &[
    "/usr/bin/java",
    "/usr/local/bin/java",
    "/usr/lib/jvm/default-java/bin/java",
    "/usr/lib/jvm/java-21-openjdk/bin/java",
    "/usr/lib/jvm/java-17-openjdk/bin/java",
    "/opt/homebrew/opt/openjdk/bin/java",
];

/// Resolves the configured java path to an executable.
///
/// An existing absolute path is used as is. The bare name `java` is looked up
/// in `PATH`, then `JAVA_HOME/bin`, then a few common install locations.
/// Anything else, or a lookup that finds nothing, is passed through unchanged.
pub fn find_java_executable(configured: &str) -> String {
    let path = Path::new(configured);
    if path.is_absolute() {
        if !path.is_file() {
            warn!("Java not found at {}", configured);
        }
        return configured.to_string();
    }
    if configured != JAVA_NAME {
        return configured.to_string();
    }

    let found = search_path(env::var_os("PATH"))
        .or_else(|| java_home(env::var_os("JAVA_HOME")))
        .or_else(|| {
            COMMON_JAVA_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file())
        });

    match found {
        Some(java) => {
            debug!("found java at {}", java.display());
            java.to_string_lossy().to_string()
        }
        None => configured.to_string(),
    }
}

fn search_path(paths: Option<std::ffi::OsString>) -> Option<PathBuf> {
    env::split_paths(&paths?)
        .map(|dir| dir.join(JAVA_FILE))
        .find(|candidate| candidate.is_file())
}

fn java_home(home: Option<std::ffi::OsString>) -> Option<PathBuf> {
    let candidate = PathBuf::from(home?).join("bin").join(JAVA_FILE);
    candidate.is_file().then_some(candidate)
}

use std::path::PathBuf;

pub const APP_DIR: &str = "marquee";

pub fn data_dir() -> PathBuf {
    // ~/.local/share/marquee on unix, regardless of the macOS default
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        if let Some(dir) = portable_dir("data") {
            return dir;
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Some(dir) = portable_dir("config") {
            return dir;
        }
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn log_path() -> PathBuf {
    data_dir().join("marquee.log")
}

/// A directory named `name` beside the executable, for portable installs.
#[cfg(windows)]
fn portable_dir(name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?.join(name);
    dir.exists().then_some(dir)
}

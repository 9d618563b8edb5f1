use std::path::PathBuf;

pub const HOME_ENV: &str = "DELEGATED_SIGN_HOME";

pub fn delegated_sign_home() -> PathBuf {
    std::env::var(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".delegated-sign")
        })
}

pub fn runtime_dir() -> PathBuf {
    delegated_sign_home().join("runtimes")
}

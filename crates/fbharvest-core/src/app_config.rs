use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub webdriver_url: String,
    pub urls_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub scroll_pause_min_ms: u64,
    pub scroll_pause_max_ms: u64,
    pub loading_timeout_secs: u64,
    pub max_scroll_steps: usize,
    pub max_concurrent_accounts: usize,
    pub tesseract_bin: String,
    pub ocr_lang: String,
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

impl AppConfig {
    /// Whether login credentials are present. They are never used to sign in;
    /// the flag only drives a startup warning.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.login_email.as_deref().is_some_and(|s| !s.is_empty())
            && self.login_password.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("webdriver_url", &self.webdriver_url)
            .field("urls_path", &self.urls_path)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("scroll_pause_min_ms", &self.scroll_pause_min_ms)
            .field("scroll_pause_max_ms", &self.scroll_pause_max_ms)
            .field("loading_timeout_secs", &self.loading_timeout_secs)
            .field("max_scroll_steps", &self.max_scroll_steps)
            .field("max_concurrent_accounts", &self.max_concurrent_accounts)
            .field("tesseract_bin", &self.tesseract_bin)
            .field("ocr_lang", &self.ocr_lang)
            .field("login_email", &self.login_email)
            .field(
                "login_password",
                &self.login_password.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

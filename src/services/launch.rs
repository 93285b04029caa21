// Launch hand-off
// The OS starts the browser with a single URL argument, either a
// `jaydensbrowser://` link or a plain http(s) URL. The URL is held until the
// chrome UI reports ready, then delivered once.

use tracing::{debug, info};

/// Custom scheme the OS hands to the browser.
pub const CUSTOM_SCHEME: &str = "jaydensbrowser";

/// Extract the URL to open from the process arguments (program name excluded).
///
/// Only the first argument is considered. `jaydensbrowser://rest` becomes
/// `https://rest`; `http://` and `https://` URLs pass unchanged; anything else
/// is ignored.
pub fn url_from_args<I, S>(args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let first = args.into_iter().next()?;
    rewrite_external_url(first.as_ref())
}

/// Rewrite a URL received from the OS into one the browser can load.
pub fn rewrite_external_url(raw: &str) -> Option<String> {
    let prefix = format!("{}://", CUSTOM_SCHEME);
    if let Some(rest) = raw.strip_prefix(&prefix) {
        return Some(format!("https://{}", rest));
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    debug!(arg = raw, "ignoring launch argument");
    None
}

/// Holds an externally supplied URL until the UI can take it.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    url: Option<String>,
    ui_ready: bool,
}

impl PendingNavigation {
    pub fn new(url: Option<String>) -> Self {
        Self { url, ui_ready: false }
    }

    pub fn is_ui_ready(&self) -> bool {
        self.ui_ready
    }

    /// Accept a URL from the OS.
    ///
    /// Returns it straight back when the UI is already ready; otherwise it is
    /// queued, replacing any earlier queued URL.
    pub fn offer(&mut self, url: String) -> Option<String> {
        if self.ui_ready {
            return Some(url);
        }
        info!(%url, "queueing external url until the ui is ready");
        self.url = Some(url);
        None
    }

    /// Mark the UI ready and take the queued URL, if any.
    ///
    /// Later calls return `None`: a queued URL is delivered once.
    pub fn mark_ready(&mut self) -> Option<String> {
        self.ui_ready = true;
        self.url.take()
    }

    /// Mark the UI as reloading; URLs arriving until the next
    /// [`PendingNavigation::mark_ready`] are queued again.
    pub fn mark_unready(&mut self) {
        self.ui_ready = false;
    }
}

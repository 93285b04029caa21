//! Native "open file" picker.

use tracing::debug;

use crate::services::input_classifier::file_url_for_path;

/// Ask the user for a local file and return its `file://` URL.
///
/// `None` when the dialog is dismissed.
pub fn pick_file_url() -> Option<String> {
    let path = rfd::FileDialog::new()
        .set_title("Open File")
        .add_filter("All Files", &["*"])
        .pick_file()?;
    debug!(path = %path.display(), "file picked");
    Some(file_url_for_path(&path).into_string())
}

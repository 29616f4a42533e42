use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use shared::ExportFile;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::services::logging::Logger;

// Revoking the object URL right after `click()` cancels the download in
// some browsers, so it is held for a moment first.
const REVOKE_DELAY_MS: u32 = 1_000;

/// Hand an export to the browser as a file download
pub fn save_file(file: &ExportFile) -> Result<(), String> {
    let document = gloo::utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create download link: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Download link is not an anchor element".to_string())?;

    let blob = Blob::new_with_options(file.content.as_str(), Some(file.mime_type));
    let url = ObjectUrl::from(blob);

    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();

    Logger::info_with_component(
        "download",
        &format!("saved {} ({} bytes)", file.filename, file.content.len()),
    );

    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();
    Ok(())
}

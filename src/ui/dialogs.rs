// Native dialogs via rfd
//
// Folder/file pickers and message boxes used by the command line front end.
// DirectoryResolver only sees these through the DirectoryPrompt trait.

use crate::services::{ArchiveFormat, DirectoryPrompt};
use camino::{Utf8Path, Utf8PathBuf};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// [`DirectoryPrompt`] backed by the platform's native folder picker.
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl DirectoryPrompt for NativeDialogs {
    fn pick_directory(&mut self, title: &str) -> Option<Utf8PathBuf> {
        loop {
            let picked = FileDialog::new().set_title(title).pick_folder()?;
            match Utf8PathBuf::try_from(picked) {
                Ok(path) => return Some(path),
                Err(e) => {
                    tracing::warn!("Selected folder path is not valid UTF-8: {}", e);
                    show_error("Invalid Folder", "The selected folder path is not valid UTF-8.");
                }
            }
        }
    }

    fn report_invalid(&mut self, _path: &Utf8Path, marker_file: &str) {
        show_error(
            "Error",
            &format!(
                "Selected folder does not contain {}. Please select the correct Data folder.",
                marker_file
            ),
        );
    }
}

/// Ask the user to confirm deleting `name`.
pub fn confirm_delete(name: &str) -> bool {
    let answer = MessageDialog::new()
        .set_title("Confirm Delete")
        .set_level(MessageLevel::Warning)
        .set_description(format!("Delete {}?", name))
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

/// Pick a mod archive to install. `None` if cancelled.
pub fn pick_archive() -> Option<Utf8PathBuf> {
    FileDialog::new()
        .set_title("Select Mod Archive")
        .add_filter("Archives", &ArchiveFormat::EXTENSIONS[..])
        .pick_file()
        .and_then(|path| {
            Utf8PathBuf::try_from(path)
                .map_err(|e| tracing::warn!("Selected archive path is not valid UTF-8: {}", e))
                .ok()
        })
}

fn show_error(title: &str, description: &str) {
    let _ = MessageDialog::new()
        .set_title(title)
        .set_level(MessageLevel::Error)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

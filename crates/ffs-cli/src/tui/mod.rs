mod app;
mod view;

use std::path::PathBuf;

use ffs_core::lister::DirectoryLister;
use ffs_core::session::Session;

/// Run the interactive picker on stderr. Returns the chosen file's full path.
pub fn run_picker(session: &mut Session<DirectoryLister>) -> color_eyre::Result<Option<PathBuf>> {
    app::run_picker(session)
}

//! Desktop integration for the menu actions.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::BaseDirs;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use oystr_menu::{
    AppWindow, OverlayKind, OverlayOptions, PathTemplate, ShellServices, WindowError,
    WindowManager, WindowRole,
};

use crate::error::{Result, ShellError};
use crate::settings::project_dirs;

/// Locale variables consulted by [`system_locale`], highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Best guess at the user's locale, e.g. `de_DE.UTF-8`.
///
/// Only the POSIX locale variables are read. Applications launched from the
/// macOS Finder or the Windows shell usually have none of them set and get
/// `en`; the `general.language` setting overrides the guess there.
#[must_use]
pub fn system_locale() -> String {
    locale_from(LOCALE_VARS.map(|var| std::env::var(var).ok()))
}

/// First usable locale value, ignoring the `C` and `POSIX` placeholders.
fn locale_from(values: impl IntoIterator<Item = Option<String>>) -> String {
    values
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
        .unwrap_or_else(|| "en".to_string())
}

const PICK_FILE: &str = "File";
const PICK_FOLDER: &str = "Folder";

/// Kind of upload source chosen in the first dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadPick {
    File,
    Folder,
}

impl UploadPick {
    /// Choice behind a button of the file-or-folder question.
    fn from_answer(answer: &MessageDialogResult) -> Option<Self> {
        match answer {
            MessageDialogResult::Yes => Some(Self::File),
            MessageDialogResult::No => Some(Self::Folder),
            MessageDialogResult::Custom(label) if label == PICK_FILE => Some(Self::File),
            MessageDialogResult::Custom(label) if label == PICK_FOLDER => Some(Self::Folder),
            _ => None,
        }
    }
}

/// Base directories path templates resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellDirs {
    /// User's home directory.
    pub home: PathBuf,
    /// Roaming application-data directory.
    pub app_data: PathBuf,
    /// This application's user-data directory.
    pub user_data: PathBuf,
}

impl ShellDirs {
    /// Directories of the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform reports no home directory.
    pub fn detect() -> Result<Self> {
        let base = BaseDirs::new().ok_or(ShellError::NoHomeDir)?;
        let user_data = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| base.home_dir().join(".oystr"));
        Ok(Self {
            home: base.home_dir().to_path_buf(),
            app_data: base.config_dir().to_path_buf(),
            user_data,
        })
    }

    /// Turn a template into an absolute path.
    #[must_use]
    pub fn resolve(&self, template: PathTemplate) -> PathBuf {
        let base = match template {
            PathTemplate::Home(_) => &self.home,
            PathTemplate::AppData(_) => &self.app_data,
            PathTemplate::UserData(_) => &self.user_data,
        };
        let relative = template.relative();
        if relative.is_empty() {
            return base.clone();
        }
        relative
            .split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(base.clone(), |path, part| path.join(part))
    }
}

/// [`ShellServices`] on a desktop session.
#[derive(Debug)]
pub struct DesktopShell {
    dirs: ShellDirs,
    upload_source: RefCell<Option<PathBuf>>,
    quit: Cell<bool>,
}

impl DesktopShell {
    /// Services resolving paths against `dirs`.
    #[must_use]
    pub fn new(dirs: ShellDirs) -> Self {
        Self {
            dirs,
            upload_source: RefCell::new(None),
            quit: Cell::new(false),
        }
    }

    /// Answer the next upload prompt with `path` instead of a dialog.
    #[must_use]
    pub fn with_upload_source(self, path: Option<PathBuf>) -> Self {
        *self.upload_source.borrow_mut() = path;
        self
    }

    /// Directories templates resolve against.
    #[must_use]
    pub fn dirs(&self) -> &ShellDirs {
        &self.dirs
    }

    /// Whether quitting was requested.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }
}

impl ShellServices for DesktopShell {
    fn resolve(&self, template: PathTemplate) -> PathBuf {
        self.dirs.resolve(template)
    }

    fn reveal_in_folder(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
        let folder = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };
        tracing::debug!(path = %folder.display(), "Revealing in file manager");
        open::that(folder)
    }

    fn open_path(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }

    fn open_external(&self, url: &str) -> io::Result<()> {
        tracing::debug!(url, "Opening in browser");
        open::that(url)
    }

    fn write_marker(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn pick_upload_source(&self) -> Option<PathBuf> {
        if let Some(path) = self.upload_source.borrow_mut().take() {
            return Some(path);
        }
        // Native pickers select either files or folders, never both.
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Upload to Swarm")
            .set_description("Upload a single file or a whole folder?")
            .set_buttons(MessageButtons::YesNoCancelCustom(
                PICK_FILE.to_string(),
                PICK_FOLDER.to_string(),
                "Cancel".to_string(),
            ))
            .show();

        let dialog = FileDialog::new().set_title("Upload to Swarm");
        match UploadPick::from_answer(&answer)? {
            UploadPick::File => dialog.pick_file(),
            UploadPick::Folder => dialog.pick_folder(),
        }
    }

    fn quit(&self) {
        self.quit.set(true);
    }
}

/// Window manager for a shell running without an interface window.
///
/// Overlays that only show a remote page open in the system browser; the
/// rest need the interface and fail.
#[derive(Debug, Default)]
pub struct HeadlessWindows;

impl WindowManager for HeadlessWindows {
    fn window(&self, _role: WindowRole) -> Option<Rc<dyn AppWindow>> {
        None
    }

    fn focused(&self) -> Option<Rc<dyn AppWindow>> {
        None
    }

    fn create_overlay(
        &self,
        kind: OverlayKind,
        options: OverlayOptions,
    ) -> std::result::Result<(), WindowError> {
        match options.url {
            Some(url) => open::that(&url).map_err(|e| WindowError::Failed(e.to_string())),
            None => Err(WindowError::Failed(format!(
                "the {} window needs the interface",
                kind.id()
            ))),
        }
    }
}

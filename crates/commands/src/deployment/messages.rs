//! User-facing text of the installer

use std::path::Path;

use askbot_runtime::deps::{MessageStyle, UserInterface};

/// Printed before anything else when verbosity is at least 1
pub const DEPLOY_PREAMBLE: &str = "
Deploying Askbot - Django Q&A forum application
Problems installing? -> please email admin@askbot.org

To CANCEL - hit Ctr-C at any time";

/// Printed when the user interrupts the setup
pub const ABORTED: &str = "\n\nAborted.";

/// Directory prompt
pub const WHERE_TO_DEPLOY: &str = "Where to deploy (in which directory)?";

/// Shown after a blank answer to the directory prompt
pub const PLEASE_TYPE_DIRECTORY: &str = "Please type a directory name (or . for the current one)";

/// Prompt text for a missing context value, underscores rendered as spaces
pub fn enter_value_for(key: &str) -> String {
    format!("Please enter a value for {}:", key.replace('_', " "))
}

/// A directory argument names an existing file
pub fn cant_install_into_file(path: &Path) -> String {
    format!("{} is a file\ncannot install there", path.display())
}

/// Neither the directory nor its nearest existing ancestor is writable
pub fn dir_not_writable(path: &Path) -> String {
    format!(
        "\nTarget directory {} cannot be created or written to:\n\
         please choose a location you have write access to",
        path.display()
    )
}

/// The directory lives inside another Django project
pub fn dir_unclean_django(path: &Path, project_dir: &Path) -> String {
    format!(
        "\nDirectory {} is inside the Django project at {}.\n\
         Please choose a directory outside of existing Django projects",
        path.display(),
        project_dir.display()
    )
}

/// Confirmation before creating a missing directory
pub fn confirm_dir_creation(path: &Path) -> String {
    format!("Directory {} does not exist - create it?", path.display())
}

/// Confirmation before installing into a non-empty directory
pub fn confirm_dir_not_empty(path: &Path) -> String {
    format!("Directory {} is not empty - install there anyway?", path.display())
}

/// The directory name would shadow a Python package
pub fn dir_name_reserved(path: &Path) -> String {
    format!(
        "\nDirectory name of {} clashes with a Python package used by askbot,\n\
         please pick a different name",
        path.display()
    )
}

/// Closing text after a fresh project was created
pub fn how_to_deploy_new(help_file: &Path) -> String {
    format!(
        "Done. Please find further instructions in the file below:\n{}",
        help_file.display()
    )
}

/// Closing text after askbot was added next to an existing Django project
pub fn how_to_add_askbot_to_django(help_file: &Path) -> String {
    format!(
        "Askbot files were added to your Django project, settings.py was left untouched.\n\
         To finish the setup merge the askbot settings as described in:\n{}",
        help_file.display()
    )
}

/// Prints `message` unless verbosity is 0
pub fn print_message(ui: &dyn UserInterface, message: &str, verbosity: u8) {
    if verbosity >= 1 {
        ui.print(message);
    }
}

/// Styled variant of [`print_message`]
pub fn print_styled_message(
    ui: &dyn UserInterface,
    message: &str,
    style: MessageStyle,
    verbosity: u8,
) {
    if verbosity >= 1 {
        ui.print_styled(message, style);
    }
}

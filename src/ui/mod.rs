//! User interface module - styled terminal output.

pub mod formatter;

pub use formatter::{
    display_command, display_detail, display_error, display_field, display_status,
    display_success, display_warning, Progress,
};

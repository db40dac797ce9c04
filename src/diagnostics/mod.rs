//! Compilation diagnostics and their source-frame rendering.

mod diagnostic;
pub mod rendering;
pub mod types;

pub use diagnostic::Diagnostic;
pub use rendering::{FrameError, format_error_frame, get_source_line};
pub use types::{Severity, SourceLocation};

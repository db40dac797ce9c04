mod frame;
mod source;

pub use frame::{FrameError, format_error_frame};
pub use source::{char_column, digit_width, get_source_line, line_count};

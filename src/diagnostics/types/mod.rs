mod location;
mod severity;

pub use location::SourceLocation;
pub use severity::Severity;

// Common test utilities


// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use capture::{CaptureSink, FailingSink};

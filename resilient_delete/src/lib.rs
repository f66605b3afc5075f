//! Recursive directory deletion that survives read-only files and
//! directories that are briefly held open by another process.
//!
//! ```rust,no_run
//! use resilient_delete::{ResilientDeleter, TracingSink};
//! use std::path::Path;
//!
//! let deleter = ResilientDeleter::new();
//! let deleted = deleter.delete(Path::new("target/tmp"), &TracingSink).unwrap();
//! ```

pub mod deleter;
pub mod error;
pub mod mock;
pub mod ops;
pub mod pause;
pub mod sink;

pub use deleter::{MAX_ATTEMPTS, RETRY_DELAY, ResilientDeleter, delete_dir};
pub use error::{DeleteError, ErrorClass};
pub use ops::{FileSystemOps, StdFileSystemOps};
pub use pause::{Pause, ThreadSleep};
pub use sink::{MessageSink, TracingSink};

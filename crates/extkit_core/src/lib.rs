//! Extension utilities for collections, maps, strings and type metadata.
//! Every helper is stateless and runs synchronously to completion.

pub mod clone;
pub mod collection;
pub mod config;
pub mod dictionary;
pub mod enumerable;
pub mod error;
pub mod line_ending;
pub mod lock;
pub mod logging;
pub mod reflection;
pub mod text;

pub use clone::{CloneExt, DeepClone};
pub use collection::CollectionExt;
pub use config::{default_log_level, LoggingConfig};
pub use dictionary::{get_or_create_shared, get_or_create_shared_default, MapExt};
pub use enumerable::{IterExt, NullItemHandling, Nullable, WithIndex};
pub use error::{ExtError, ExtResult};
pub use line_ending::{
    determine_line_endings, normalize_line_endings, normalize_line_endings_legacy,
    LineEndingStyle,
};
pub use lock::with_lock;
pub use logging::{init_logging, logging_status};
pub use reflection::{BindingFlags, MethodInfo, TypeRegistry};
pub use text::StrExt;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

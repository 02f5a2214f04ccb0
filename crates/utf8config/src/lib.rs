//! # utf8config
//!
//! A comment-preserving, typed, INI-style configuration format for UTF-8
//! text.
//!
//! Values are typed on load (`None`, `True`/`yes`/`是`, integers, floats,
//! quoted or bare strings, and flat comma-separated lists), and comments
//! survive a load → dump round trip: the block of `#` lines above a field or
//! section header, and the inline `# ...` after a value.
//!
//! ## Quick start
//!
//! ```rust
//! use utf8config::{Config, Value};
//!
//! let text = "\
//! ## Connection settings
//! [DEFAULT]
//! host = 192.168.0.1 # IP address
//! ports = 8080, 8081
//! ";
//!
//! let config = Config::load(text).unwrap();
//! let section = config.section("DEFAULT").unwrap();
//! assert_eq!(section.upper_comment(), "Connection settings");
//! assert_eq!(section.field("host").unwrap().side_comment(), "IP address");
//! assert_eq!(
//!     config.value("DEFAULT", "ports").unwrap(),
//!     &Value::List(vec![Value::Int(8080), Value::Int(8081)])
//! );
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: value text ↔ [`Value`] (`decode`, `encode`)
//! - [`parser`]: comment-aware line grouping (`group_into_units`, inline comments)
//! - [`field`], [`section`], [`config`]: the document tree, each with `load`/`dump`
//! - [`io`]: read/write UTF-8 files
//! - [`error`]: error type

pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod io;
mod ordered;
pub mod parser;
pub mod section;
pub mod value;

pub use codec::{decode, encode};
pub use config::Config;
pub use error::{Result, Utf8ConfigError};
pub use field::{validate_key, Field};
pub use io::{read_text, write_text};
pub use parser::{extract_comment, group_into_units, split_inline_comment, LogicalUnit};
pub use section::{validate_section_name, Section};
pub use value::{Value, ValueKind};

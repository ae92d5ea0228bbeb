//! Zero-copy command-line tokenizer and option lookup table.
//!
//! One pass over a process argument vector or a raw command-line string
//! yields an ordered list of free-standing arguments plus a key/value map
//! of `-`/`--` options, with typed accessors layered on top. Every token
//! is a borrowed slice into the caller's input; nothing is copied.
//!
//! ```
//! use optview::Options;
//!
//! let o = Options::from_cmdline(r#"--jobs=4 --verbose --name="build box" input.txt"#);
//! assert_eq!(o.get_int("jobs"), Some(4));
//! assert!(o.get_bool("verbose").unwrap());
//! assert_eq!(o.get_str("name"), Some("build box"));
//! assert_eq!(o.arg_str(0).unwrap(), "input.txt");
//! ```
//!
//! Accepted syntax:
//!
//! ```text
//! long-opt   = "--" key [ "=" value ]
//! short-opt  = "-" key [ "=" value ]      ; key may be multi-char; no clustering
//! value      = quoted | unquoted
//! quoted     = DQUOTE *CHAR DQUOTE
//! positional = quoted | unquoted-token
//! ```
//!
//! `-abc` is the single key `abc`, not three clustered flags; callers
//! wanting POSIX clustering must pre-split such arguments.
//!
//! Wide command lines (UTF-16 units from `GetCommandLineW`, say) parse
//! through the same scanner via [`Options::from_cmdline_units`]; lookups
//! always take narrow `&str` keys regardless of the store's width.

mod error;
mod options;
mod scan;
mod unit;

pub use error::{Error, Result};
pub use options::{strip_quotes, strip_quotes_units, Options, OptionsBuilder};
pub use unit::TextUnit;

/// Default cap on units examined per scanned input. Longer input is
/// silently truncated mid-scan; override per store via
/// [`OptionsBuilder::max_length`].
pub const MAX_LENGTH: usize = 4096;

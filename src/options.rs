//! Option store and typed accessors.
//!
//! `Options` is built once from an argument vector or a combined command
//! line and is read-only afterwards. Every stored token borrows from the
//! caller's input, so the input buffers must outlive the store; the
//! borrow checker enforces this.

use std::collections::BTreeMap;
use std::str;

use crate::error::{Error, Result};
use crate::scan::scan;
use crate::unit::{to_narrow, to_narrow_lossy, unit_str_eq, TextUnit};
use crate::MAX_LENGTH;

// Boolean synonym tables, case sensitive. A value matching neither set is
// an InvalidArgument error, never a silent default.
const TRUE_WORDS: [&str; 8] = ["TRUE", "true", "T", "YES", "yes", "Y", "y", "1"];
const FALSE_WORDS: [&str; 8] = ["FALSE", "false", "F", "NO", "no", "N", "n", "0"];

// ---------------------------------------------------------------------------
// OptionsBuilder -- construction with a non-default scan cap
// ---------------------------------------------------------------------------

/// Configures construction of an [`Options`] store.
///
/// The only knob is the scan cap: at most `max_length` units are examined
/// per scanned input, truncating silently past that.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    max_length: usize,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        OptionsBuilder {
            max_length: MAX_LENGTH,
        }
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Parse one combined command line, splitting on whitespace.
    pub fn cmdline<'a>(&self, cmd: &'a str) -> Options<'a> {
        self.cmdline_units(cmd.as_bytes())
    }

    /// Parse a process-style argument vector. The first element (program
    /// name) is skipped; each remaining element is scanned independently
    /// in single-value mode, so whitespace inside one element never
    /// splits it further.
    pub fn argv<'a, I>(&self, argv: I) -> Options<'a>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut o = Options::empty();
        for arg in argv.into_iter().skip(1) {
            scan(arg.as_bytes(), true, self.max_length, &mut o.args, &mut o.opts);
        }
        o
    }

    /// Width-generic variant of [`OptionsBuilder::cmdline`].
    pub fn cmdline_units<'a, U: TextUnit>(&self, cmd: &'a [U]) -> Options<'a, U> {
        let mut o = Options::empty();
        scan(cmd, false, self.max_length, &mut o.args, &mut o.opts);
        o
    }

    /// Width-generic variant of [`OptionsBuilder::argv`].
    pub fn argv_units<'a, U: TextUnit>(&self, argv: &[&'a [U]]) -> Options<'a, U> {
        let mut o = Options::empty();
        for arg in argv.iter().skip(1) {
            scan(arg, true, self.max_length, &mut o.args, &mut o.opts);
        }
        o
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Parsed command-line tokens: free-standing arguments in encounter order
/// plus a key/value map of named options.
///
/// Immutable after construction. All slices borrow from the input with
/// lifetime `'a`.
#[derive(Debug)]
pub struct Options<'a, U: TextUnit = u8> {
    /// Free-standing values, in the order encountered.
    pub(crate) args: Vec<&'a [U]>,
    /// Parsed key/value pairs. Bare keys map to the empty slice.
    pub(crate) opts: BTreeMap<&'a [U], &'a [U]>,
}

impl<'a, U: TextUnit> Options<'a, U> {
    pub(crate) fn empty() -> Self {
        Options {
            args: Vec::new(),
            opts: BTreeMap::new(),
        }
    }

    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Parse one combined command line of arbitrary unit width.
    pub fn from_cmdline_units(cmd: &'a [U]) -> Self {
        OptionsBuilder::new().cmdline_units(cmd)
    }

    /// Parse an argument vector of arbitrary unit width; element 0 is the
    /// program name and is skipped.
    pub fn from_argv_units(argv: &[&'a [U]]) -> Self {
        OptionsBuilder::new().argv_units(argv)
    }

    fn find_opt(&self, key: &str) -> Option<&'a [U]> {
        // The map is keyed on unit slices; probe it by widening the narrow
        // key per character. Maps are small, a linear pass is fine.
        self.opts
            .iter()
            .find(|(k, _)| unit_str_eq(k, key))
            .map(|(_, v)| *v)
    }

    /// True iff the key was supplied, with or without a value.
    pub fn has_opt(&self, key: &str) -> bool {
        self.find_opt(key).is_some()
    }

    /// The stored value for `key`. A bare option yields `Some` of an empty
    /// slice, distinct from `None` for an absent key.
    pub fn get_string(&self, key: &str) -> Option<&'a [U]> {
        self.find_opt(key)
    }

    /// Like [`Options::get_string`], substituting `default` when absent.
    pub fn get_string_or(&self, key: &str, default: &'a [U]) -> &'a [U] {
        self.get_string(key).unwrap_or(default)
    }

    /// Like [`Options::get_string`], but an absent key is an error.
    pub fn get_required_string(&self, key: &str) -> Result<&'a [U]> {
        self.get_string(key)
            .ok_or_else(|| Error::NotFound(format!("option not provided: {}", key)))
    }

    /// Boolean lookup with `false` as the absent-key default.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_bool_or(key, false)
    }

    /// Boolean lookup. Absent key yields `default`; a bare option is
    /// `true`; otherwise the value must match one of the fixed synonym
    /// sets (case sensitive) or the lookup fails.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        let v = match self.get_string(key) {
            Some(v) => v,
            None => return Ok(default),
        };
        if v.is_empty() {
            return Ok(true);
        }
        if TRUE_WORDS.iter().any(|w| unit_str_eq(v, w)) {
            return Ok(true);
        }
        if FALSE_WORDS.iter().any(|w| unit_str_eq(v, w)) {
            return Ok(false);
        }
        Err(Error::InvalidArgument(format!(
            "boolean option {} not recognized: {}",
            key,
            to_narrow_lossy(v)
        )))
    }

    /// Integer lookup. Absent key or a value that is not exactly a base-10
    /// integer yields `None`; this accessor never fails.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        let v = self.get_string(key)?;
        to_narrow(v)?.parse::<i32>().ok()
    }

    /// Like [`Options::get_int`], substituting `default` when absent or
    /// unparsable.
    pub fn get_int_or(&self, key: &str, default: i32) -> i32 {
        self.get_int(key).unwrap_or(default)
    }

    /// Free-standing argument at `index`, failing when out of range.
    pub fn arg(&self, index: usize) -> Result<&'a [U]> {
        self.args.get(index).copied().ok_or_else(|| {
            Error::NotFound(format!(
                "argument index {} out of range ({} arguments)",
                index,
                self.args.len()
            ))
        })
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// All free-standing arguments, in the order encountered.
    pub fn args(&self) -> &[&'a [U]] {
        &self.args
    }
}

// ---------------------------------------------------------------------------
// Narrow-text convenience layer
// ---------------------------------------------------------------------------

impl<'a> Options<'a> {
    /// Parse one combined command line.
    pub fn from_cmdline(cmd: &'a str) -> Self {
        OptionsBuilder::new().cmdline(cmd)
    }

    /// Parse a process-style argument vector, skipping the program name.
    ///
    /// `std::env::args()` yields owned strings; collect them first so the
    /// store has a buffer to borrow from:
    ///
    /// ```
    /// let argv: Vec<String> = std::env::args().collect();
    /// let opts = optview::Options::from_argv(argv.iter().map(String::as_str));
    /// assert_eq!(opts.arg_count(), opts.args().len());
    /// ```
    pub fn from_argv<I>(argv: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        OptionsBuilder::new().argv(argv)
    }

    /// [`Options::get_string`] as `&str`.
    ///
    /// Token boundaries always fall on ASCII delimiters, so a store built
    /// from `&str` only holds valid UTF-8; a token that is not (possible
    /// only via `from_cmdline_units` on arbitrary bytes) reads as absent.
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get_string(key).and_then(|v| str::from_utf8(v).ok())
    }

    /// [`Options::get_string_or`] as `&str`.
    pub fn get_str_or(&self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// [`Options::get_required_string`] as `&str`.
    pub fn get_required_str(&self, key: &str) -> Result<&'a str> {
        let v = self.get_required_string(key)?;
        str::from_utf8(v)
            .map_err(|_| Error::InvalidArgument(format!("option {} is not valid UTF-8", key)))
    }

    /// [`Options::arg`] as `&str`.
    pub fn arg_str(&self, index: usize) -> Result<&'a str> {
        let v = self.arg(index)?;
        str::from_utf8(v).map_err(|_| {
            Error::InvalidArgument(format!("argument {} is not valid UTF-8", index))
        })
    }
}

// ---------------------------------------------------------------------------
// Quote stripping helpers
// ---------------------------------------------------------------------------

/// Strip one surrounding pair of double quotes, if present.
pub fn strip_quotes(s: &str) -> &str {
    let t = s.strip_prefix('"').unwrap_or(s);
    t.strip_suffix('"').unwrap_or(t)
}

/// Width-generic variant of [`strip_quotes`].
pub fn strip_quotes_units<U: TextUnit>(s: &[U]) -> &[U] {
    let mut t = s;
    if t.first().is_some_and(|u| u.code() == '"' as u32) {
        t = &t[1..];
    }
    if t.last().is_some_and(|u| u.code() == '"' as u32) {
        t = &t[..t.len() - 1];
    }
    t
}

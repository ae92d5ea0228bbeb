//! Single-pass command-line scanner.
//!
//! A small state machine walks the input one unit at a time and appends
//! the tokens it finds into the shared positional list and option map.
//! Tokens are slices of the input; nothing is copied per unit.

use std::collections::BTreeMap;

use crate::unit::TextUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    KeyPrefix,
    LongKeyPrefix,
    Key,
    Value,
    QuotedValue,
}

// Delimiters are classified in code space so one scanner serves every
// unit width.
fn is_eol(c: u32) -> bool {
    c == 0
}

fn is_whitespace(c: u32) -> bool {
    c == ' ' as u32 || c == '\t' as u32 || c == '\r' as u32 || c == '\n' as u32
}

fn is_dash(c: u32) -> bool {
    c == '-' as u32
}

fn is_quote(c: u32) -> bool {
    c == '"' as u32
}

fn is_equal_sign(c: u32) -> bool {
    c == '=' as u32
}

/// Scan one input and append its tokens to `args`/`opts`.
///
/// End of slice and an embedded NUL unit both terminate the scan; the
/// terminator is run through the state machine before the in-flight token
/// is flushed. The scan also stops after `max_length` units, silently
/// dropping whatever token is still open at the cap.
///
/// With `single_value` set (one pre-split argv element), whitespace does
/// not terminate an unquoted value token; the remainder of the element is
/// the value. Quote stripping and `key=value` splitting still apply.
///
/// Everything between a single `-` and the next delimiter is one key:
/// `-abc` is the key `abc`, not three clustered flags. Callers wanting
/// POSIX clustering must pre-split such arguments themselves.
pub(crate) fn scan<'a, U: TextUnit>(
    input: &'a [U],
    single_value: bool,
    max_length: usize,
    args: &mut Vec<&'a [U]>,
    opts: &mut BTreeMap<&'a [U], &'a [U]>,
) {
    let empty: &'a [U] = &[];

    let mut state = State::None;
    let mut token_start = 0usize;
    let mut key: &'a [U] = empty;

    let mut i = 0usize;
    while i < max_length {
        // One unit past the end scans as the NUL terminator.
        let c = input.get(i).map_or(0, |u| u.code());

        match state {
            State::None => {
                if is_whitespace(c) {
                    // skip
                } else if is_dash(c) {
                    state = State::KeyPrefix;
                    if !key.is_empty() {
                        opts.entry(key).or_insert(empty);
                    }
                } else if is_quote(c) {
                    state = State::QuotedValue;
                    token_start = i;
                } else {
                    state = State::Value;
                    token_start = i;
                }
            }
            State::KeyPrefix => {
                if is_dash(c) {
                    state = State::LongKeyPrefix;
                } else if is_whitespace(c) {
                    state = State::None;
                } else {
                    state = State::Key;
                    token_start = i;
                }
            }
            State::LongKeyPrefix => {
                if is_whitespace(c) {
                    state = State::None;
                } else {
                    state = State::Key;
                    token_start = i;
                }
            }
            State::Key => {
                if is_whitespace(c) {
                    state = State::None;
                    if i > token_start {
                        // Bare option: present with an empty value. Does
                        // not clobber a value stored earlier for the key.
                        opts.entry(&input[token_start..i]).or_insert(empty);
                    }
                } else if is_equal_sign(c) {
                    state = State::Value;
                    key = &input[token_start..i];
                    token_start = i + 1;
                }
            }
            State::Value => {
                if is_quote(c) && token_start == i {
                    // `--opt="..."`: a quote as the very first value unit
                    // starts a quoted value.
                    state = State::QuotedValue;
                } else if is_whitespace(c) && !single_value {
                    state = State::None;
                    if !key.is_empty() {
                        opts.insert(key, &input[token_start..i]);
                    } else {
                        args.push(&input[token_start..i]);
                    }
                    key = empty;
                }
            }
            State::QuotedValue => {
                if is_quote(c) {
                    state = State::None;
                    if !key.is_empty() {
                        opts.insert(key, &input[token_start + 1..i]);
                    } else {
                        args.push(&input[token_start + 1..i]);
                    }
                    key = empty;
                }
            }
        }

        if is_eol(c) {
            // Flush the trailing token per the state's own closing rule.
            // Nothing to flush from None/KeyPrefix/LongKeyPrefix: a
            // dangling dash prefix is dropped.
            match state {
                State::Key if token_start < i => {
                    opts.entry(&input[token_start..i]).or_insert(empty);
                }
                State::Value => {
                    if !key.is_empty() {
                        opts.insert(key, &input[token_start..i]);
                    } else if i > token_start {
                        // Only non-empty free-standing tokens are kept.
                        args.push(&input[token_start..i]);
                    }
                }
                State::QuotedValue => {
                    if !key.is_empty() {
                        opts.insert(key, &input[token_start + 1..i]);
                    } else {
                        args.push(&input[token_start + 1..i]);
                    }
                }
                _ => {}
            }
            break;
        }

        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_LENGTH;

    fn scan_str(input: &str, single_value: bool) -> (Vec<&[u8]>, BTreeMap<&[u8], &[u8]>) {
        let mut args = Vec::new();
        let mut opts = BTreeMap::new();
        scan(input.as_bytes(), single_value, MAX_LENGTH, &mut args, &mut opts);
        (args, opts)
    }

    #[test]
    fn long_option_with_value() {
        let (args, opts) = scan_str("--k=v", false);
        assert!(args.is_empty());
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"v".as_slice()));
    }

    #[test]
    fn bare_long_option_has_empty_value() {
        let (args, opts) = scan_str("--flag", false);
        assert!(args.is_empty());
        assert_eq!(opts.get(b"flag".as_slice()), Some(&b"".as_slice()));
    }

    #[test]
    fn short_option_key_is_not_clustered() {
        let (_, opts) = scan_str("-ab", false);
        assert!(opts.contains_key(b"ab".as_slice()));
        assert!(!opts.contains_key(b"a".as_slice()));
        assert!(!opts.contains_key(b"b".as_slice()));
    }

    #[test]
    fn quoted_value_keeps_inner_whitespace() {
        let (args, opts) = scan_str("--k=\"a b\"", false);
        assert!(args.is_empty());
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"a b".as_slice()));
    }

    #[test]
    fn quoted_positional_is_one_token() {
        let (args, _) = scan_str("\"a b c\"", false);
        assert_eq!(args, vec![b"a b c".as_slice()]);
    }

    #[test]
    fn unquoted_positionals_split_on_whitespace() {
        let (args, _) = scan_str("one two\tthree", false);
        assert_eq!(args, vec![b"one".as_slice(), b"two".as_slice(), b"three".as_slice()]);
    }

    #[test]
    fn empty_unquoted_tokens_are_dropped() {
        let (args, opts) = scan_str("   \t  ", false);
        assert!(args.is_empty());
        assert!(opts.is_empty());
    }

    #[test]
    fn empty_quoted_positional_is_kept() {
        let (args, _) = scan_str("\"\"", false);
        assert_eq!(args, vec![b"".as_slice()]);
    }

    #[test]
    fn lone_dash_is_dropped() {
        let (args, opts) = scan_str("- x", false);
        assert_eq!(args, vec![b"x".as_slice()]);
        assert!(opts.is_empty());
    }

    #[test]
    fn trailing_dash_prefix_is_dropped() {
        let (args, opts) = scan_str("x --", false);
        assert_eq!(args, vec![b"x".as_slice()]);
        assert!(opts.is_empty());
    }

    #[test]
    fn trailing_bare_key_is_flushed() {
        let (_, opts) = scan_str("--k", false);
        assert!(opts.contains_key(b"k".as_slice()));
    }

    #[test]
    fn value_after_bare_flag_overwrites_empty() {
        let (_, opts) = scan_str("--k --k=v", false);
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"v".as_slice()));
    }

    #[test]
    fn bare_flag_after_value_does_not_clobber() {
        let (_, opts) = scan_str("--k=v --k", false);
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"v".as_slice()));
    }

    #[test]
    fn empty_assigned_value_is_stored_empty() {
        let (_, opts) = scan_str("--k= x", false);
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"".as_slice()));
    }

    #[test]
    fn single_value_mode_keeps_whitespace_in_value() {
        let (args, opts) = scan_str("--msg=hello world", true);
        assert!(args.is_empty());
        assert_eq!(opts.get(b"msg".as_slice()), Some(&b"hello world".as_slice()));
    }

    #[test]
    fn single_value_mode_keeps_whole_positional() {
        let (args, _) = scan_str("param param", true);
        assert_eq!(args, vec![b"param param".as_slice()]);
    }

    #[test]
    fn embedded_nul_terminates_like_end_of_input() {
        let (args, opts) = scan_str("--k=v\0--dropped", false);
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"v".as_slice()));
        assert!(!opts.contains_key(b"dropped".as_slice()));
        assert!(args.is_empty());
    }

    #[test]
    fn cap_drops_token_in_flight() {
        let mut args = Vec::new();
        let mut opts = BTreeMap::new();
        // "--k=v " completes at unit 5; "xyz" is still open at the cap.
        scan(b"--k=v xyz".as_slice(), false, 7, &mut args, &mut opts);
        assert_eq!(opts.get(b"k".as_slice()), Some(&b"v".as_slice()));
        assert!(args.is_empty());
    }

    #[test]
    fn cap_between_tokens_keeps_completed_ones() {
        let mut args = Vec::new();
        let mut opts = BTreeMap::new();
        scan(b"aa bb cc".as_slice(), false, 6, &mut args, &mut opts);
        assert_eq!(args, vec![b"aa".as_slice(), b"bb".as_slice()]);
    }

    #[test]
    fn wide_input_scans_identically() {
        let wide: Vec<u16> = "--k=\"a b\" free".encode_utf16().collect();
        let mut args: Vec<&[u16]> = Vec::new();
        let mut opts: BTreeMap<&[u16], &[u16]> = BTreeMap::new();
        scan(&wide, false, MAX_LENGTH, &mut args, &mut opts);
        let k: Vec<u16> = "k".encode_utf16().collect();
        let v: Vec<u16> = "a b".encode_utf16().collect();
        let free: Vec<u16> = "free".encode_utf16().collect();
        assert_eq!(opts.get(k.as_slice()), Some(&v.as_slice()));
        assert_eq!(args, vec![free.as_slice()]);
    }
}

//! Text units -- the scanner and store work over any fixed-width code unit.
//!
//! Narrow stores scan UTF-8 bytes, wide stores scan UTF-16 (`u16`) or
//! UTF-32 (`u32`/`char`) units. Lookups always take narrow `&str` keys;
//! the key is widened one character at a time for comparison, stored data
//! is never narrowed or mutated.

/// A fixed-width code unit the scanner can classify and slice.
pub trait TextUnit: Copy + Eq + Ord {
    /// The unit's code value. Delimiter classification and narrow-key
    /// comparison both happen in this space.
    fn code(self) -> u32;
}

impl TextUnit for u8 {
    #[inline]
    fn code(self) -> u32 {
        self as u32
    }
}

impl TextUnit for u16 {
    #[inline]
    fn code(self) -> u32 {
        self as u32
    }
}

impl TextUnit for u32 {
    #[inline]
    fn code(self) -> u32 {
        self
    }
}

impl TextUnit for char {
    #[inline]
    fn code(self) -> u32 {
        self as u32
    }
}

/// Compare a stored token against a narrow string, widening the narrow
/// side. Codepoint equality per unit; ASCII keys and synonym words make
/// this exact for every supported width.
pub(crate) fn unit_str_eq<U: TextUnit>(units: &[U], s: &str) -> bool {
    let mut it = units.iter();
    for ch in s.chars() {
        match it.next() {
            Some(u) if u.code() == ch as u32 => {}
            _ => return false,
        }
    }
    it.next().is_none()
}

/// Narrow a token for numeric parsing. Fails on units that are not valid
/// scalar values (lone surrogates in `u16` data, say).
pub(crate) fn to_narrow<U: TextUnit>(units: &[U]) -> Option<String> {
    let mut s = String::with_capacity(units.len());
    for u in units {
        s.push(char::from_u32(u.code())?);
    }
    Some(s)
}

/// Lossy narrowing for error messages only.
pub(crate) fn to_narrow_lossy<U: TextUnit>(units: &[U]) -> String {
    units
        .iter()
        .map(|u| char::from_u32(u.code()).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

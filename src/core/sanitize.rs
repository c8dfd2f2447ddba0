// src/core/sanitize.rs

/// ASCII-only lowercase; other chars pass through so byte offsets line up
/// with the original string.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Case-insensitive (ASCII) substring search. Returns a byte offset into `s`.
pub fn find_ci(s: &str, needle: &str) -> Option<usize> {
    to_lower(s).find(&to_lower(needle))
}

pub fn contains_ci(s: &str, needle: &str) -> bool {
    find_ci(s, needle).is_some()
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Stable id from a display name.
///
/// Lowercase, drop everything but `[a-z0-9]` and whitespace, join the
/// remaining words with single hyphens. "Arco-flagellants" → "arcoflagellants",
/// "Marneus Calgar" → "marneus-calgar".
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Leading integer of a descriptive count ("10 (1 SB, 5 Init.)" → 10).
pub fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Lenient numeric attribute parse: "80", "80.0", " 12.5 " → rounded.
/// Anything unparsable or non-finite is `None`.
pub fn parse_number(s: &str) -> Option<i64> {
    let v: f64 = s.trim().parse().ok()?;
    if v.is_finite() { Some(v.round() as i64) } else { None }
}

/// `round(a / b)` with halves rounded up, for non-negative operands.
pub fn round_div(a: u32, b: u32) -> u32 {
    if b == 0 { return a; }
    ((2 * a as u64 + b as u64) / (2 * b as u64)) as u32
}

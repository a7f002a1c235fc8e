// src/utils.rs

/// Uppercases the first character of a string, leaving the rest untouched.
/// Reference tables store unit names lowercased; labels want a leading
/// capital.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

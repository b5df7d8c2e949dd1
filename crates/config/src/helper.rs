//! Compile-time parsing helpers
//!
//! All helpers are `const fn` so that configuration values are resolved at build time, which
//! rules out most of the standard string API. Invalid values abort the build.

/// Helper macro to check is boolean choice is enabled by the configuration, defaulting to no.
#[macro_export]
macro_rules! is_enabled_default_false {
    ($env_var: tt) => {
        match option_env!($env_var) {
            Some(env_var) => match env_var.as_bytes() {
                b"true" => true,
                _ => false,
            },
            None => false,
        }
    };
}

/// Parse an integer, either in decimal or in hexadecimal with a `0x` prefix.
///
/// Underscores are not supported.
pub const fn parse_usize(env_var: Option<&str>) -> Option<usize> {
    let Some(value) = env_var else {
        return None;
    };

    let bytes = value.as_bytes();
    let is_hex = bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X');
    let (digits, radix) = if is_hex {
        // Indexing with a range is not available in const contexts, but splitting is.
        (bytes.split_at(2).1, 16)
    } else {
        (bytes, 10)
    };

    let digits = match core::str::from_utf8(digits) {
        Ok(digits) => digits,
        Err(_) => panic!("Invalid integer in configuration"),
    };
    match usize::from_str_radix(digits, radix) {
        Ok(value) => Some(value),
        Err(_) => panic!("Failed to parse integer from configuration"),
    }
}

pub const fn parse_usize_or(env_var: Option<&str>, default: usize) -> usize {
    match parse_usize(env_var) {
        Some(value) => value,
        None => default,
    }
}

pub const fn parse_str_or(env_var: Option<&'static str>, default: &'static str) -> &'static str {
    match env_var {
        Some(var) => var,
        None => default,
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

//! BN.SUM4 self-test configuration
//!
//! This crate hosts the environment variables used to configure the self-test firmware for a
//! given platform, the chosen configuration values, as well as helpers to parse the variables
//! values at compile time. The runner sets the variables from its TOML configuration.

#![no_std]

pub mod helper;
use helper::*;

// ———————————————————————————————— Logging ————————————————————————————————— //

/// The desired log level.
pub const LOG_LEVEL: Option<&'static str> = option_env!("BN_SUM4_LOG_LEVEL");
pub const LOG_LEVEL_ENV: &str = "BN_SUM4_LOG_LEVEL";

/// If colors in logs are enabled.
pub const LOG_COLOR: bool = is_enabled_default_false!("BN_SUM4_LOG_COLOR");
pub const LOG_COLOR_ENV: &str = "BN_SUM4_LOG_COLOR";

// ———————————————————————————————— Platform ———————————————————————————————— //

/// The name of the target platform, only used for display.
pub const PLATFORM_NAME: &str = parse_str_or(option_env!("BN_SUM4_PLATFORM_NAME"), "4-soc");
pub const PLATFORM_NAME_ENV: &str = "BN_SUM4_PLATFORM_NAME";

/// Address of the result register.
pub const RESULT_ADDRESS: usize =
    parse_usize_or(option_env!("BN_SUM4_RESULT_ADDRESS"), 0x1000_0000);
pub const RESULT_ADDRESS_ENV: &str = "BN_SUM4_RESULT_ADDRESS";

/// Address of the done register.
pub const DONE_ADDRESS: usize = parse_usize_or(option_env!("BN_SUM4_DONE_ADDRESS"), 0x1000_0004);
pub const DONE_ADDRESS_ENV: &str = "BN_SUM4_DONE_ADDRESS";

/// Address of the console register, logs are discarded if None.
///
/// Each byte of a log line is sent with its own 32-bit store.
pub const CONSOLE_ADDRESS: Option<usize> = parse_usize(option_env!("BN_SUM4_CONSOLE_ADDRESS"));
pub const CONSOLE_ADDRESS_ENV: &str = "BN_SUM4_CONSOLE_ADDRESS";

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_are_distinct_and_aligned() {
        assert_ne!(RESULT_ADDRESS, DONE_ADDRESS);
        assert_eq!(RESULT_ADDRESS % 4, 0, "Result register must be word aligned");
        assert_eq!(DONE_ADDRESS % 4, 0, "Done register must be word aligned");
    }
}

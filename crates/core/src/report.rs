//! Test report protocol
//!
//! The self-test reports through two write-only 32-bit registers, observed by the test bench:
//!
//! - The result register receives [PASS], or [FAIL_BASE] with the index of the failing vector in
//!   the low byte.
//! - The done register receives [DONE_MAGIC] once the result has been written.

use core::fmt;

// —————————————————————————————— Result Codes —————————————————————————————— //

/// All vectors matched.
pub const PASS: u32 = 0x0000_0001;
/// Failure marker, the low byte holds the index of the failing vector.
pub const FAIL_BASE: u32 = 0xBAD0_0000;
/// Bits of a failure code that are not part of the index.
pub const FAIL_MASK: u32 = 0xFFFF_FF00;
/// Index reported when the firmware panics instead of failing on a vector.
pub const PANIC_INDEX: u8 = 0xFF;
/// Written to the done register when the test is over.
pub const DONE_MAGIC: u32 = 0xCAFE_F00D;

/// The failure code for a given vector index.
///
/// Only the low byte of the index is kept.
pub const fn failure_code(index: usize) -> u32 {
    FAIL_BASE | (index as u32 & 0xff)
}

/// The registers used to report the outcome of the test.
///
/// Both are write-only from the point of view of the firmware, they are never read back.
pub trait TestRegisters {
    fn write_result(&mut self, value: u32);
    fn write_done(&mut self, value: u32);

    /// Write the result code, then signal completion.
    ///
    /// The order matters: the test bench stops polling as soon as the done register holds the
    /// magic value.
    fn report(&mut self, result: u32) {
        self.write_result(result);
        self.write_done(DONE_MAGIC);
    }
}

// ———————————————————————————————— Verdict ————————————————————————————————— //

/// An interpretation of the values observed in the report registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The done register does not hold the magic value yet.
    Pending,
    /// All vectors matched.
    Pass,
    /// The vector at `index` did not match.
    Fail { index: u8 },
    /// The firmware panicked.
    Panicked,
    /// The test finished, but the result register holds an unknown value.
    Invalid(u32),
}

impl Verdict {
    pub const fn from_registers(result: u32, done: u32) -> Self {
        if done != DONE_MAGIC {
            return Verdict::Pending;
        }

        if result == PASS {
            Verdict::Pass
        } else if result & FAIL_MASK == FAIL_BASE {
            match result as u8 {
                PANIC_INDEX => Verdict::Panicked,
                index => Verdict::Fail { index },
            }
        } else {
            Verdict::Invalid(result)
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pending => write!(f, "pending: the test did not signal completion"),
            Verdict::Pass => write!(f, "pass: all vectors matched"),
            Verdict::Fail { index } => write!(f, "fail: mismatch on vector {}", index),
            Verdict::Panicked => write!(f, "fail: the firmware panicked"),
            Verdict::Invalid(result) => write!(f, "invalid result code 0x{:08x}", result),
        }
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_codes() {
        assert_eq!(failure_code(0), 0xBAD00000);
        assert_eq!(failure_code(2), 0xBAD00002);
        assert_eq!(failure_code(4), 0xBAD00004);
        assert_eq!(failure_code(0x1ff), 0xBAD000FF);
    }

    #[test]
    fn verdicts() {
        assert_eq!(Verdict::from_registers(PASS, DONE_MAGIC), Verdict::Pass);
        assert_eq!(
            Verdict::from_registers(0xBAD00002, DONE_MAGIC),
            Verdict::Fail { index: 2 }
        );
        assert_eq!(
            Verdict::from_registers(0xBAD000FF, DONE_MAGIC),
            Verdict::Panicked
        );
        assert_eq!(
            Verdict::from_registers(0xDEADBEEF, DONE_MAGIC),
            Verdict::Invalid(0xDEADBEEF)
        );
        assert_eq!(Verdict::from_registers(0, DONE_MAGIC), Verdict::Invalid(0));

        // Nothing counts before the done register is written
        assert_eq!(Verdict::from_registers(PASS, 0), Verdict::Pending);
        assert_eq!(Verdict::from_registers(0xBAD00001, 0), Verdict::Pending);
    }

    #[derive(Default)]
    struct Recorder {
        writes: [(u8, u32); 2],
        count: usize,
    }

    impl TestRegisters for Recorder {
        fn write_result(&mut self, value: u32) {
            self.writes[self.count] = (b'r', value);
            self.count += 1;
        }

        fn write_done(&mut self, value: u32) {
            self.writes[self.count] = (b'd', value);
            self.count += 1;
        }
    }

    #[test]
    fn report_writes_result_then_done() {
        let mut regs = Recorder::default();
        regs.report(failure_code(3));
        assert_eq!(regs.count, 2);
        assert_eq!(regs.writes, [(b'r', 0xBAD00003), (b'd', 0xCAFEF00D)]);
    }
}

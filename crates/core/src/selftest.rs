//! The BN.SUM4 self-test driver
//!
//! The driver is written against two seams so that it does not depend on the platform: a
//! [Sum4Unit] executing the instruction, and the [TestRegisters] receiving the report. The
//! firmware plugs the real instruction and MMIO registers, unit tests plug mocks.

use thiserror_no_std::Error;

use crate::report::{failure_code, TestRegisters, PASS};
use crate::vectors::TestVector;

// ————————————————————————————— Hardware Seams ————————————————————————————— //

/// Something that can execute BN.SUM4.
pub trait Sum4Unit {
    fn sum4(&mut self, activations: u32, weights: u32) -> i32;
}

// ——————————————————————————— Self-Test Driver ———————————————————————————— //

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestError {
    #[error("vector {index}: hardware returned {hardware}, reference expects {reference}")]
    Mismatch {
        index: usize,
        hardware: i32,
        reference: i32,
    },
}

impl SelfTestError {
    /// The value to write in the result register.
    pub const fn result_code(&self) -> u32 {
        match self {
            SelfTestError::Mismatch { index, .. } => failure_code(*index),
        }
    }
}

/// Run the vectors in order against the unit, stopping at the first mismatch.
pub fn run<U: Sum4Unit>(unit: &mut U, vectors: &[TestVector]) -> Result<(), SelfTestError> {
    for (index, vector) in vectors.iter().enumerate() {
        let hardware = unit.sum4(vector.activations, vector.weights);
        let reference = vector.expected();

        log::debug!(
            "Vector {}: acts 0x{:08x} wts 0x{:02x} -> hw {} sw {}",
            index,
            vector.activations,
            vector.weights,
            hardware,
            reference
        );

        if hardware != reference {
            return Err(SelfTestError::Mismatch {
                index,
                hardware,
                reference,
            });
        }
    }

    Ok(())
}

// ——————————————————————————————— Reporting ———————————————————————————————— //

/// The result code corresponding to an outcome.
pub const fn result_code(outcome: &Result<(), SelfTestError>) -> u32 {
    match outcome {
        Ok(()) => PASS,
        Err(err) => err.result_code(),
    }
}

/// Report the outcome of a run to the test bench.
pub fn report<R: TestRegisters>(outcome: &Result<(), SelfTestError>, regs: &mut R) {
    match outcome {
        Ok(()) => log::info!("BN.SUM4 self-test passed"),
        Err(err) => log::error!("BN.SUM4 self-test failed: {}", err),
    }
    regs.report(result_code(outcome));
}

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Verdict;
    use crate::vectors::VECTORS;

    /// A unit following the reference, optionally corrupting the result of one vector.
    struct MockUnit {
        faulty: Option<usize>,
        calls: usize,
    }

    impl MockUnit {
        fn new(faulty: Option<usize>) -> Self {
            MockUnit { faulty, calls: 0 }
        }
    }

    impl Sum4Unit for MockUnit {
        fn sum4(&mut self, activations: u32, weights: u32) -> i32 {
            let idx = self.calls;
            self.calls += 1;

            let sum = crate::reference::sum4(activations, weights);
            if self.faulty == Some(idx) {
                sum + 1
            } else {
                sum
            }
        }
    }

    /// Registers that remember the last value written, and how many times they were written.
    #[derive(Default)]
    struct MockRegisters {
        result: Option<u32>,
        done: Option<u32>,
        result_writes: usize,
        done_writes: usize,
    }

    impl TestRegisters for MockRegisters {
        fn write_result(&mut self, value: u32) {
            assert!(self.done.is_none(), "Result written after done");
            self.result = Some(value);
            self.result_writes += 1;
        }

        fn write_done(&mut self, value: u32) {
            self.done = Some(value);
            self.done_writes += 1;
        }
    }

    fn run_and_report(unit: &mut MockUnit) -> MockRegisters {
        let mut regs = MockRegisters::default();
        let outcome = run(unit, &VECTORS);
        report(&outcome, &mut regs);
        regs
    }

    #[test]
    fn all_vectors_pass() {
        let mut unit = MockUnit::new(None);
        let regs = run_and_report(&mut unit);

        assert_eq!(unit.calls, VECTORS.len());
        assert_eq!(regs.result, Some(0x00000001));
        assert_eq!(regs.done, Some(0xCAFEF00D));
        assert_eq!(regs.result_writes, 1, "Result must be written exactly once");
        assert_eq!(regs.done_writes, 1, "Done must be written exactly once");
    }

    #[test]
    fn stops_at_first_mismatch() {
        let mut unit = MockUnit::new(Some(2));
        let regs = run_and_report(&mut unit);

        assert_eq!(unit.calls, 3, "No vector after the failing one can be evaluated");
        assert_eq!(regs.result, Some(0xBAD00002));
        assert_eq!(regs.done, Some(0xCAFEF00D));
        assert_eq!(regs.result_writes, 1);
        assert_eq!(regs.done_writes, 1);
    }

    #[test]
    fn every_failing_index_is_reported() {
        for faulty in 0..VECTORS.len() {
            let mut unit = MockUnit::new(Some(faulty));
            let regs = run_and_report(&mut unit);
            let verdict = Verdict::from_registers(regs.result.unwrap(), regs.done.unwrap());

            assert_eq!(verdict, Verdict::Fail { index: faulty as u8 });
            assert_eq!(unit.calls, faulty + 1);
        }
    }

    #[test]
    fn mismatch_details() {
        let mut unit = MockUnit::new(Some(1));
        let err = run(&mut unit, &VECTORS).unwrap_err();

        assert_eq!(
            err,
            SelfTestError::Mismatch {
                index: 1,
                hardware: 93,
                reference: 92
            }
        );
        assert_eq!(err.result_code(), 0xBAD00001);
    }

    #[test]
    fn empty_run_passes() {
        let mut unit = MockUnit::new(Some(0));
        assert_eq!(run(&mut unit, &[]), Ok(()));
        assert_eq!(result_code(&Ok(())), 1);
        assert_eq!(unit.calls, 0);
    }
}

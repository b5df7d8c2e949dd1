//! BN.SUM4 self-test
//!
//! Runs the custom instruction on the fixed vectors, checks each result against the software
//! reference, and reports to the test bench through the result and done registers. The hart
//! halts after the first mismatch, or after the last vector.

// Mark the crate as no_std and no_main, but only when not running tests.
// We need both std and main to be able to run tests in user-space on the host architecture.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
#![cfg_attr(test, allow(dead_code))]

use bn_sum4_abi::{halt, platform_registers, setup_binary};
use bn_sum4_config as config;
use bn_sum4_core::{selftest, Sum4Unit, VECTORS};

setup_binary!(main);

fn main() -> ! {
    log::info!("BN.SUM4 self-test on {}", config::PLATFORM_NAME);

    let outcome = selftest::run(&mut Hardware, &VECTORS);
    selftest::report(&outcome, &mut platform_registers());

    halt()
}

// ————————————————————————————— Hardware Unit —————————————————————————————— //

/// The BN.SUM4 instruction of the current hart.
struct Hardware;

impl Sum4Unit for Hardware {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    fn sum4(&mut self, activations: u32, weights: u32) -> i32 {
        let sum: i32;
        // The result depends on hardware the compiler knows nothing about: no `pure` nor `nomem`
        // so that the instruction is never elided, merged or moved across memory accesses.
        unsafe {
            core::arch::asm!(
                ".insn r 0x0b, 0, 0x00, {rd}, {rs1}, {rs2}",
                rd = lateout(reg) sum,
                rs1 = in(reg) activations,
                rs2 = in(reg) weights,
                options(nostack),
            );
        }
        sum
    }

    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    fn sum4(&mut self, _activations: u32, _weights: u32) -> i32 {
        unimplemented!("BN.SUM4 is only available on RISC-V harts with the extension")
    }
}

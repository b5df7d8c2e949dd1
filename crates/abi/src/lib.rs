//! Firmware ABI
//!
//! Runtime support for bare-metal self-test binaries: entry point and stack setup, panic
//! handler, report registers and a console logger. A binary only needs to provide a
//! `fn main() -> !` and invoke [setup_binary!].
//!
//! The memory layout expected by the entry point (`_stack_top`, `_bss_start` and `_bss_stop`) is
//! provided by `misc/linker-script.x`.
#![no_std]

pub mod logger;
pub mod mmio;

pub use bn_sum4_core::report::{failure_code, PANIC_INDEX};
pub use bn_sum4_core::TestRegisters;
pub use log;
pub use mmio::{platform_registers, MmioTestRegisters, WriteOnly};

// ———————————————————————————— Client Functions ———————————————————————————— //

/// Stop the hart for good.
///
/// This is the terminal state of every test binary, the loop is never exited. Interrupts are
/// never enabled, so in practice the hart sleeps on the first `wfi`.
pub fn halt() -> ! {
    loop {
        wait_for_interrupt();
    }
}

/// Report `result` to the test bench, then halt.
pub fn report_and_halt(result: u32) -> ! {
    platform_registers().report(result);
    halt()
}

/// Report a panic as a failure, then halt.
///
/// The reported index is [PANIC_INDEX], which never matches a test vector.
pub fn report_panic(info: &core::panic::PanicInfo) -> ! {
    log::error!("Firmware panicked: {}", info);
    report_and_halt(failure_code(PANIC_INDEX as usize))
}

// —————————————————————————————— Binary Setup —————————————————————————————— //

/// Configure the binary entry point and panic handler.
///
/// This macro prepares all the boiler plate required by a bare-metal test binary: the
/// assembly entry point setting up the stack and clearing `.bss`, the logger initialization,
/// and the panic handler. Nothing is emitted for host unit tests.
#[macro_export]
macro_rules! setup_binary {
    ($path:path) => {
        // The assembly entry point
        #[cfg(not(test))]
        core::arch::global_asm!(
            r#"
            .section .text.init, "ax"
            .global _start
            _start:
                // Load the stack pointer
                la sp, _stack_top

                // Zero the .bss section
                la t0, _bss_start
                la t1, _bss_stop
            1:
                bgeu t0, t1, 2f
                sw zero, 0(t0)
                addi t0, t0, 4
                j 1b

                // Jump into Rust
            2:
                j {entry}
            "#,
            entry = sym _binary_start,
        );

        #[cfg(not(test))]
        pub extern "C" fn _binary_start() -> ! {
            // Validate the signature of the entry point.
            let f: fn() -> ! = $path;

            // Initialize logger
            $crate::logger::init();

            f();
        }

        // Also include the panic handler
        #[cfg(not(test))]
        $crate::binary_panic!();
    };
}

/// Configure a panic handler for a test binary.
///
/// The handler reports a failure to the test bench, then halts.
#[macro_export]
macro_rules! binary_panic {
    () => {
        #[panic_handler]
        fn panic(info: &core::panic::PanicInfo) -> ! {
            $crate::report_panic(info)
        }
    };
}

// ————————————————————————————————— Utils —————————————————————————————————— //

#[inline]
fn wait_for_interrupt() {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    unsafe {
        core::arch::asm!("wfi", options(nostack));
    }

    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    core::hint::spin_loop();
}

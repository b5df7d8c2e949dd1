//! Memory-mapped registers
//!
//! The report registers are fixed hardware locations provided by the platform. The firmware
//! never owns them as mutable globals: handles are built from the configured addresses and
//! handed to whoever needs to report.

use bn_sum4_config as config;
use bn_sum4_core::TestRegisters;

// ————————————————————————————— MMIO Registers ————————————————————————————— //

/// A write-only memory-mapped register.
///
/// Writes are volatile, they are neither elided nor merged by the compiler.
pub struct WriteOnly<T> {
    addr: *mut T,
}

impl<T: Copy> WriteOnly<T> {
    /// Create a handle to the register located at `addr`.
    ///
    /// # Safety
    ///
    /// `addr` must be a properly aligned register (or memory location) that can be written with
    /// a value of type `T` for as long as the handle is used.
    pub const unsafe fn new(addr: usize) -> Self {
        WriteOnly {
            addr: addr as *mut T,
        }
    }

    pub fn write(&self, value: T) {
        // SAFETY: validity of the address is guaranteed by the caller of `new`.
        unsafe { self.addr.write_volatile(value) }
    }

    pub fn addr(&self) -> usize {
        self.addr as usize
    }
}

/// The result and done registers, as exposed by the platform.
pub struct MmioTestRegisters {
    result: WriteOnly<u32>,
    done: WriteOnly<u32>,
}

impl MmioTestRegisters {
    /// # Safety
    ///
    /// Both addresses must be valid 32-bit registers, see [WriteOnly::new].
    pub const unsafe fn new(result: usize, done: usize) -> Self {
        MmioTestRegisters {
            result: WriteOnly::new(result),
            done: WriteOnly::new(done),
        }
    }
}

impl TestRegisters for MmioTestRegisters {
    fn write_result(&mut self, value: u32) {
        log::trace!("result <- 0x{:08x} (at 0x{:x})", value, self.result.addr());
        self.result.write(value);
    }

    fn write_done(&mut self, value: u32) {
        log::trace!("done <- 0x{:08x} (at 0x{:x})", value, self.done.addr());
        self.done.write(value);
    }
}

/// Returns the report registers of the configured platform.
pub fn platform_registers() -> MmioTestRegisters {
    // SAFETY: the addresses are part of the platform description the firmware is built for.
    unsafe { MmioTestRegisters::new(config::RESULT_ADDRESS, config::DONE_ADDRESS) }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_to_memory() {
        // Plain memory stands in for the MMIO registers
        let mut result: u32 = 0;
        let mut done: u32 = 0;
        let mut regs = unsafe {
            MmioTestRegisters::new(
                &mut result as *mut u32 as usize,
                &mut done as *mut u32 as usize,
            )
        };

        regs.report(0xBAD00004);

        assert_eq!(result, 0xBAD00004);
        assert_eq!(done, 0xCAFEF00D);
    }
}

//! Build
//!
//! The build subcommand compiles a firmware for the configured platform and extracts a raw
//! binary image that can be loaded by the simulator or the test bench.

use std::path::PathBuf;
use std::process::{Command, ExitCode};

use crate::config::{read_config, Config, Profiles};
use crate::path::{get_linker_script_path, get_target_dir_path, get_workspace_path, is_older};
use crate::BuildArgs;

/// Default load address of the firmware.
const DEFAULT_START_ADDRESS: usize = 0x0000_0000;

// ————————————————————————————————— Build —————————————————————————————————— //

pub fn build(args: &BuildArgs) -> ExitCode {
    let Some(cfg) = read_config(&args.config) else {
        return ExitCode::FAILURE;
    };

    match build_firmware(&args.firmware, &cfg) {
        Some(image) => {
            log::info!("Built firmware, binary available at:");
            log::info!("{}", image.display());
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

/// Perform the actual build by invoking cargo.
///
/// Returns the path of the resulting binary image.
pub fn build_firmware(firmware: &str, cfg: &Config) -> Option<PathBuf> {
    let mut build_cmd = Command::new(env!("CARGO"));
    build_cmd
        .current_dir(get_workspace_path())
        .arg("build")
        .arg("--target")
        .arg(cfg.target.triple())
        .arg("--package")
        .arg(firmware);

    build_cmd.arg("--profile");
    match cfg.target.profile() {
        Profiles::Debug => build_cmd.arg("dev"),
        Profiles::Release => build_cmd.arg("release"),
    };

    build_cmd.env("RUSTFLAGS", linker_args(cfg));
    build_cmd.envs(cfg.build_envs());

    log::debug!("{:?}", build_cmd);
    match build_cmd.status() {
        Ok(status) if status.success() => (),
        Ok(_) => {
            log::error!("Build failed with command: {:?}", build_cmd);
            return None;
        }
        Err(err) => {
            log::error!("Failed to run cargo: {}", err);
            return None;
        }
    }

    objcopy(firmware, cfg)
}

/// Linker arguments, passed through `RUSTFLAGS`.
fn linker_args(cfg: &Config) -> String {
    let start_address = cfg.target.start_address.unwrap_or(DEFAULT_START_ADDRESS);
    let mut args = format!(
        "-C link-arg=-T{} -C link-arg=--defsym=_start_address=0x{:x}",
        get_linker_script_path().display(),
        start_address
    );
    if let Some(stack_size) = cfg.target.stack_size {
        args.push_str(&format!(
            " -C link-arg=--defsym=_stack_size=0x{:x}",
            stack_size
        ));
    }
    args
}

// ———————————————————————————————— Objcopy ————————————————————————————————— //

/// Extract raw binary from elf file.
///
/// Returns the path of the resulting binary.
fn objcopy(firmware: &str, cfg: &Config) -> Option<PathBuf> {
    let path = get_target_dir_path(cfg.target.triple(), cfg.target.profile());
    let elf_path = path.join(firmware);
    let bin_path = path.join(format!("{}.img", firmware));

    if is_older(&elf_path, &bin_path) {
        // No change since last objcopy, skipping
        return Some(bin_path);
    }

    let mut objcopy_cmd = Command::new("rust-objcopy");
    objcopy_cmd
        .arg("-O")
        .arg("binary")
        .arg(&elf_path)
        .arg(&bin_path);

    match objcopy_cmd.status() {
        Ok(status) if status.success() => Some(bin_path),
        Ok(_) => {
            log::error!("objcopy failed on '{}'", elf_path.display());
            None
        }
        Err(_) => {
            log::error!("objcopy failed. Is `rust-objcopy` installed?");
            None
        }
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

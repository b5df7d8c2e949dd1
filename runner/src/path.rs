//! Path helper functions

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Profiles;

/// Return the root of the workspace.
pub fn get_workspace_path() -> PathBuf {
    let Ok(runner_manifest) = std::env::var("CARGO_MANIFEST_DIR") else {
        panic!("Could not locate workspace root");
    };
    let path = PathBuf::from_str(&runner_manifest).unwrap();
    path.parent().unwrap().to_owned()
}

/// Return the directory holding the build outputs of a given target triple and profile.
pub fn get_target_dir_path(triple: &str, mode: Profiles) -> PathBuf {
    let mut path = get_workspace_path();
    path.push("target");
    path.push(triple);
    match mode {
        Profiles::Debug => path.push("debug"),
        Profiles::Release => path.push("release"),
    }
    path
}

/// Return the path to the linker script, relative to the workspace root.
pub fn get_linker_script_path() -> PathBuf {
    PathBuf::from("misc/linker-script.x")
}

/// Return true if `a` is older than `b`
pub fn is_older(a: &Path, b: &Path) -> bool {
    let Ok(a_meta) = a.metadata() else {
        return false;
    };
    let Ok(b_meta) = b.metadata() else {
        return false;
    };

    match (a_meta.modified(), b_meta.modified()) {
        (Ok(a), Ok(b)) => a <= b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_layout() {
        let root = get_workspace_path();
        assert!(root.join("Cargo.toml").is_file());
        assert!(root.join(get_linker_script_path()).is_file());
        assert!(root.join("firmware").is_dir());
    }

    #[test]
    fn target_dir() {
        let path = get_target_dir_path("riscv32i-unknown-none-elf", Profiles::Release);
        assert!(path.ends_with("target/riscv32i-unknown-none-elf/release"));
    }
}

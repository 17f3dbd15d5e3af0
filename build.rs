//! Build script for the sensor gate firmware
//!
//! Adds the crate directory to the linker search path so a board-specific
//! `memory.x` placed next to `Cargo.toml` overrides the one from
//! `embassy-stm32`'s `memory-x` feature.

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    // Host test builds never reach the linker flags below.
    if std::env::var("CARGO_FEATURE_EMBEDDED").is_ok() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}

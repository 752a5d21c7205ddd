//! Build script for the synthesizer panel firmware
//!
//! Passes the defmt linker script through when building for the target.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only the on-target binary needs the defmt section layout
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}

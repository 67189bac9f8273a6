// build.rs: pick link arguments for the kernel binary by target
use std::{env, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=link.ld");

    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("x86_64-") {
        println!("cargo:warning=Unsupported target for the kernel image: {target}");
        return;
    }

    let manifest = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap());

    if target.ends_with("-none") {
        // Bare metal: place the image where BOOTBOOT expects it.
        let script = manifest.join("link.ld");
        println!("cargo:rustc-link-arg-bins=-T{}", script.display());
        println!("cargo:rustc-link-arg-bins=-static");
    } else if target.contains("-linux-") {
        // Hosted build of the binary (unit tests live in the lib): we bring
        // our own _start.
        println!("cargo:rustc-link-arg-bins=-nostartfiles");
    }
}

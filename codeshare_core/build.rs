use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let udl_path = PathBuf::from(manifest_dir).join("src/codeshare_core.udl");
    println!("cargo:rerun-if-changed={}", udl_path.display());

    let udl_path = udl_path.to_str().expect("UDL path contains invalid UTF-8");
    uniffi_build::generate_scaffolding_for_crate(udl_path, "codeshare_core")
        .expect("failed to generate UniFFI scaffolding for codeshare_core");
}

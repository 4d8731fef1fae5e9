use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Generate build info
    generate_build_info();
}

fn generate_build_info() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let build_info = format!(
        r#"pub const BUILD_INFO: &str = "routedoc {} built with {}";"#,
        env!("CARGO_PKG_VERSION"),
        rustc_version()
    );

    std::fs::write(out_dir.join("build_info.rs"), build_info).expect("Failed to write build info");
}

fn rustc_version() -> String {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    match Command::new(rustc).arg("--version").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim().to_string(),
        Err(_) => "unknown rustc".to_string(),
    }
}

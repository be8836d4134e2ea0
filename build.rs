use chrono::Utc;

/// Stamps the compile date into `BUILD_DATE` for the startup log line.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!(
        "cargo:rustc-env=BUILD_DATE={}",
        Utc::now().date_naive().format("%Y-%m-%d")
    );
}

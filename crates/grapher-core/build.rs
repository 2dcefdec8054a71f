// File: crates/grapher-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs.

fn main() {
    // build scripts run on the host, so ask cargo for the target
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}

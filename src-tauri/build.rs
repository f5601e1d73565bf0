//! Build script for VisionAR.
//!
//! Only the desktop shell needs Tauri codegen. The library core is built
//! without it so it can be tested headless.

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build();
}

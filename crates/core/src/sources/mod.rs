pub mod memory;
pub mod traits;

// File-backed source (native only)
#[cfg(not(target_arch = "wasm32"))]
pub mod encrypted_file;

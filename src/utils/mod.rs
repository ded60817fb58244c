// Utils compartidos

pub mod constants;
pub mod html;

#[cfg(target_arch = "wasm32")]
pub mod leaflet_ffi;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use constants::*;

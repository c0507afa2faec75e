pub mod config;
pub mod console;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::start;

#[cfg(not(target_arch = "wasm32"))]
pub fn start() {
    eprintln!("tempfiles-web runs in the browser only; build it for wasm32-unknown-unknown");
}

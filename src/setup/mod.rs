//! Toolchain verification, tool installation and server launch

pub mod installer;
pub mod launcher;
pub mod registry;
pub mod verifier;
pub mod version;

pub use launcher::{launch, launch_until, LaunchOptions};
pub use registry::Tool;
pub use verifier::{verify_runtime, EnvSnapshot};

pub mod session;
#[cfg(feature = "cli")]
pub mod shell;

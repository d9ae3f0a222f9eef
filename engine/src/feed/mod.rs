pub mod gen;
#[cfg(feature = "service")]
pub mod service;

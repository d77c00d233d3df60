pub mod client;
pub mod deepl;

pub use client::{TranslateError, Translator};
pub use deepl::DeepLClient;

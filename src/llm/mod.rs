pub mod client;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;
pub mod prompts;
pub mod types;

pub use client::*;
pub use mock::*;
#[cfg(feature = "openai")]
pub use openai::*;
pub use types::*;

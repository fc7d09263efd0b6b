//! CarroQueen chat for Souperb
//!
//! Wraps a hosted instruction-tuned language model behind [`LanguageModel`],
//! formats prompts with the CarroQueen persona, and exposes the
//! authenticated `/api/chat` routes.
//!
//! # Feature Flags
//!
//! - `api` - Enable the HTTP routes
//! - `client` - Enable the Hugging Face inference client

pub mod error;
pub mod model;
pub mod persona;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "client")]
pub mod huggingface;

pub use error::{ModelError, ModelResult};
pub use model::{GenerationParameters, LanguageModel, MockLanguageModel};
pub use persona::{format_instruction, CARROQUEEN_PROMPT};

#[cfg(feature = "client")]
pub use huggingface::{HuggingFaceClient, DEFAULT_MODEL_ENDPOINT};

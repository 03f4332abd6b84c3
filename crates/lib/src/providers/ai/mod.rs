pub mod gemini;

use crate::errors::AiError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a generative text provider.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError>;
}

dyn_clone::clone_trait_object!(AiProvider);

//! Prompt contracts: fixed instructions for the generation call
//!
//! Defines the contract between the model and the transcriber.

mod prompts;

pub use prompts::{build_generation_request, system_prompt, user_prompt};

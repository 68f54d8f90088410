pub mod prompts;
pub mod schemas;

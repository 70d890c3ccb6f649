mod prompt;

pub use prompt::{prompt, select};

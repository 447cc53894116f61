//! The shell layer: turns command lines into tree operations and phrases
//! their failures the way a Unix shell would.

mod command;
mod error;
mod session;
mod tokenizer;

pub use error::CommandError;
pub use session::{CLEAR_SCREEN, CommandOutput, Session};

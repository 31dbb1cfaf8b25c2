//! UI abstraction layer
//!
//! Commands never talk to a terminal directly. They prompt through
//! `UserInput` and report through `OutputWriter`, so the same prompt chains
//! run in a terminal (dialoguer + colored stdout) or against scripted answers.
//!
//! # Core Traits
//!
//! - **`UserInput`** - text input, confirmation, single and multi selection;
//!   every prompt can come back empty when the user cancels
//! - **`OutputWriter`** - status messages with severity levels
//!
//! ## User Input
//!
//! ```no_run
//! use search_filters::ui::input::{UserInput, DialoguerInput};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = DialoguerInput::new();
//!
//! if let Some(true) = input.prompt_confirm("Delete filter 'frontend'?", false)? {
//!     println!("Deleting...");
//! }
//! # Ok(())
//! # }
//! ```

pub mod input;
pub mod output;

#[cfg(test)]
pub mod mock;

pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};

//! Line-oriented shell protocol
//!
//! A request is one command line written to the shell's stdin. A response is the
//! sequence of stdout lines up to a `CommandResult <code>` terminator.
//!
//! - `protocol`: response framing and the terminator grammar
//! - `options`: launch parameters and timeouts for a shell

pub mod options;
pub mod protocol;

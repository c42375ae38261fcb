//! Output dispatch.
//!
//! Sends the changelog to every selected sink, in a fixed order:
//! wiki, stdout, file.

mod dispatcher;
mod error;


pub use dispatcher::Dispatcher;
pub use error::DispatchError;

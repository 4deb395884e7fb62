mod client_error;
mod transport_error;

pub use client_error::{ClientError, ClientResult, Operation};
pub use transport_error::TransportError;

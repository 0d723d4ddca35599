//! Wire protocol: inbound parameters, outbound operations and messages.

pub mod keys;
mod message;
mod operation;
mod params;

pub use message::{Message, MessageBuilder, MessageHead};
pub use operation::{Operation, PropertyList};
pub use params::{ParamDecoder, ParamValue, RequestParams};

pub mod encoding;
pub mod error;
pub mod filter;

pub use encoding::Token;
pub use error::EncodingError;
pub use filter::{SearchFilter, node::FilterNode};

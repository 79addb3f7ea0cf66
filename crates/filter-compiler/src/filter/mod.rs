pub mod boolean;
pub mod builder;
pub mod compiler;
pub mod encoder;
pub mod functions;
pub mod mangle;
pub mod range;

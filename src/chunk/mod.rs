//! Chunked binary stream layer.
//!
//! Scene streams are a flat sequence of framed chunks:
//!
//! ```text
//! +------------------+
//! | Type tag         |  4 bytes (u32 LE)
//! +------------------+
//! | Payload size     |  4 bytes (u32 LE, header not counted)
//! +------------------+
//! | Library stamp    |  4 bytes (u32 LE)
//! +------------------+
//! | ... Payload ...  |
//! +------------------+
//! ```
//!
//! Readers navigate by declared payload size, so every writer must declare
//! exactly the bytes it goes on to produce.

mod format;
mod stream;

pub use format::*;
pub use stream::*;

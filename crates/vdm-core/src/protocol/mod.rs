//! Protocol module containing wire message types and the binary codec.

pub mod codec;
pub mod messages;
pub mod sequence;

pub use codec::{decode_event, decode_header, encode_event, FrameHeader, ProtocolError};
pub use messages::*;
pub use sequence::SequenceCounter;

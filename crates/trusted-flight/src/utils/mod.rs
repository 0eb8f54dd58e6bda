pub(crate) mod bounds;
pub mod codec;

pub use codec::{Alphabet, decode, encode};

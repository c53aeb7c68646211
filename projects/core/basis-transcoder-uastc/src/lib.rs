#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod bise;
pub mod block;
pub mod error;
pub mod mode;
pub mod patterns;

pub use block::{decode_block, UastcBlock, UASTC_BLOCK_SIZE};
pub use error::UastcError;
pub use mode::Mode;

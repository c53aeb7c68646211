#![no_main]

// Every 16 byte block either decodes or reports a mode or pattern error.

use basis_transcoder_uastc::{decode_block, UastcError};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct UastcBlock {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: UastcBlock| {
    match decode_block(&block.bytes) {
        Ok(_) => {}
        Err(UastcError::InvalidMode(mode)) => assert!(mode < 128),
        Err(UastcError::InvalidPattern { .. }) => {}
    }
});

pub mod frames;
pub mod info;
pub mod transcode;

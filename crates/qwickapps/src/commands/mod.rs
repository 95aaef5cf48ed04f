pub mod init;
pub mod render;
pub mod roundtrip;
pub mod validate;

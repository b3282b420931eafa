pub mod init;
pub mod macros;
pub mod test_capture;

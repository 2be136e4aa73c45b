pub mod init;
pub mod mask;

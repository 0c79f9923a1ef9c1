pub mod build;
pub mod catalog;
pub mod init;
pub mod serve;

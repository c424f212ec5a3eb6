pub mod clear_history;
pub mod history;
pub mod init;
pub mod play;
pub mod validate;

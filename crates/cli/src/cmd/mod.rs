mod check;
mod compose;
mod init;

pub use check::cmd_check;
pub use compose::cmd_compose;
pub use init::cmd_init;

pub mod build;
pub mod detect;
pub mod publish;
pub mod serve;
pub mod watch;

pub mod error;
pub mod mut_channel;
pub mod sync_timer;

pub mod dispatch;
pub mod history;
pub mod shared;
pub mod status;

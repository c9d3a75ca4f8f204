pub mod ai;
pub mod cal;
pub mod dispatch;

pub mod sm2;

pub use sm2::{ScheduleError, Sm2Result, schedule_next};

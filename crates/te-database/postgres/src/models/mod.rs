pub mod event;
pub mod poller_run;
pub mod price;

pub use event::{Event, EventMetadataUpdate, NewEvent};
pub use poller_run::{NewPollerRun, NewPollerRunEvent, PollerRun, PollerRunEvent};
pub use price::{DailyPrice, HourlyPrice, NewDailyPrice, NewHourlyPrice};

pub mod activity;
pub mod annual;
pub mod classification;
pub mod delta_record;
pub mod global_delta;
pub mod month;
pub mod observation;
pub mod rating_level;
pub mod speed;
pub mod timeline_entry;

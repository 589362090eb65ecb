pub mod hour_window;
pub mod observation;

pub mod calendar;
pub mod doctor;
pub mod selection;
pub mod slots;

pub use calendar::{full_day_name, month_label, parse_short_day, week_days, week_days_from};
pub use doctor::{DoctorDirectory, DoctorService};
pub use selection::{BookingSelection, SelectedDay, SelectionState};
pub use slots::{day_availability, expand_day, update_available_hours};

pub mod booking;
pub mod ledger;
pub mod lifecycle;

pub use booking::BookingService;
pub use ledger::AppointmentLedger;
pub use lifecycle::AppointmentLifecycleService;

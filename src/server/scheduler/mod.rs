pub mod event_reminders;

pub mod event;
pub mod event_type;

pub use event::Event;
pub use event_type::EventType;

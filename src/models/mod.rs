pub mod event;
pub mod jumuah;
pub mod prayer;

pub use event::Event;
pub use jumuah::JumuahSlot;
pub use prayer::{IqamaType, PrayerEntry, PrayerRecord, PrayerType};

pub mod events;
pub mod header;
pub mod jumuah;
pub mod mosque;
pub mod next_prayer;
pub mod prayers;
pub mod statusbar;

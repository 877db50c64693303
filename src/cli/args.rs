use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "iqama", version, author, about = "Mosque prayer times, Iqama and the next Jama'ah countdown")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure the mosque and its location (only the given fields change)
    Setup(SetupArgs),
    /// Show prayer times and the countdown to the next Jama'ah
    Times {
        /// Show the record for this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<String>,
        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the Adhan time of a prayer
    Adhan {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha)
        prayer: String,
        /// 12-hour time, e.g. "5:12 AM"
        time: String,
        /// Edit the record for this date (YYYY-MM-DD) instead of the current one
        #[arg(long)]
        date: Option<String>,
    },
    /// Set the Iqama of a prayer as a fixed time or minutes after Adhan
    #[command(group(ArgGroup::new("rule").required(true).args(["fixed", "offset"])))]
    Iqama {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha)
        prayer: String,
        /// Fixed 12-hour time, e.g. "5:30 AM"
        #[arg(long)]
        fixed: Option<String>,
        /// Minutes after the Adhan
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i32>,
        /// Edit the record for this date (YYYY-MM-DD) instead of the current one
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a stored prayer record
    Clear {
        /// Delete the record for this date (YYYY-MM-DD) instead of the current one
        #[arg(long)]
        date: Option<String>,
    },
    /// Jumu'ah khutbah times
    Jumuah {
        #[command(subcommand)]
        action: JumuahCommands,
    },
    /// Upcoming mosque events
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Recalculate Adhan times from the configured location
    Sync {
        /// Refresh even if already done today
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Mosque name shown in the header
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub imam: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Calculation method, e.g. MuslimWorldLeague, Karachi, NorthAmerica
    #[arg(long)]
    pub method: Option<String>,
    /// Hanafi or Shafi
    #[arg(long)]
    pub madhab: Option<String>,
    /// UTC offset, e.g. "+10", "5:30", "-4"
    #[arg(long, allow_hyphen_values = true)]
    pub tz: Option<String>,
    /// Days to shift the Hijri date for local moon sighting
    #[arg(long, allow_negative_numbers = true)]
    pub hijri_offset: Option<i32>,
    /// Automatic Adhan times: off, maghrib or all
    #[arg(long)]
    pub auto_fetch: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum JumuahCommands {
    /// Show the khutbah times
    List,
    /// Add a khutbah time
    Add {
        /// 12-hour time, e.g. "12:30 PM"
        khutbah: String,
        /// Time of the prayer after this khutbah, e.g. "1:00 PM"
        #[arg(long)]
        prayer: Option<String>,
    },
    /// Remove a khutbah time by id
    Remove { id: i64 },
    /// Remove all khutbah times
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Show upcoming events
    List {
        /// Only this category (lecture, community, youth, women, education, charity)
        #[arg(long)]
        category: Option<String>,
        /// Include past and hidden events
        #[arg(long)]
        all: bool,
    },
    /// Add an event
    Add {
        title: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// 12-hour time, e.g. "7:00 PM"
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "community")]
        category: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        speaker: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Hide an event without deleting it
    Hide { id: i64 },
    /// Show a hidden event again
    Show { id: i64 },
    /// Delete an event
    Remove { id: i64 },
}

use chrono::NaiveDate;
use clap::Args;
use timevis_core::timeline::{events_in_range, MAX_DAY_COUNT};
use timevis_core::Config;

#[derive(Args)]
pub struct EventsArgs {
    /// First day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Number of consecutive days (1 to 31)
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAY_COUNT))
    )]
    pub days: u32,
}

pub async fn run(args: EventsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let events = config.event_store().load_range(args.date, args.days).await?;
    let events = events_in_range(&events, args.date, args.days);
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use timevis_core::timeline::{events_in_range, MAX_DAY_COUNT};
use timevis_core::{Config, SvgSurface};

#[derive(Args)]
pub struct RenderArgs {
    /// First day to render (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Number of consecutive days (1 to 31)
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAY_COUNT))
    )]
    pub days: u32,
    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the computed layout as JSON instead of SVG
    #[arg(long)]
    pub layout: bool,
}

pub async fn run(args: RenderArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let events = config.event_store().load_range(args.date, args.days).await?;
    let events = events_in_range(&events, args.date, args.days);
    if events.is_empty() {
        tracing::warn!(date = %args.date, days = args.days, "no events in range");
    }

    let renderer = config.renderer()?;
    let mut surface = SvgSurface::with_metrics(config.text);
    let layout = renderer.render(&events, args.date, args.days, &mut surface)?;

    let content = if args.layout {
        serde_json::to_string_pretty(&layout)?
    } else {
        surface.to_document()
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, content)?;
            eprintln!(
                "Rendered {} block(s) to {}",
                layout.block_count(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}

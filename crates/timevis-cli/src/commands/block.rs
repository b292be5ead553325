use clap::Args;
use timevis_core::{render_block, Config};

#[derive(Args)]
pub struct BlockArgs {
    /// Directive body, e.g. `dayView 2024-11-08 3`
    #[arg(required = true, num_args = 1..)]
    pub source: Vec<String>,
}

/// Placeholders are printed like charts; they are not errors.
pub async fn run(args: BlockArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let output = render_block(&args.source.join(" "), config).await;
    println!("{}", output.text());
    Ok(())
}

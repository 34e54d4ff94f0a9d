use clap::Args;
use recovery_core::DurationBreakdown;

#[derive(Args)]
pub struct BreakdownArgs {
    /// Number of days
    days: u32,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: BreakdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let breakdown = DurationBreakdown::from_days(args.days);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{breakdown}");
    }
    Ok(())
}

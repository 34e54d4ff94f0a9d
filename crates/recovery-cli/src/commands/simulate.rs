//! Simulation commands: the results panel and the day-by-day projection.

use clap::Args;
use serde_json::json;
use tracing::debug;

use recovery_core::{format_with_separator, Config, ModelInputs};

/// Slider values. Anything omitted falls back to the `[defaults]` config section.
#[derive(Args)]
pub struct InputArgs {
    /// Exposure difficulty (1-10)
    #[arg(long)]
    struggle: Option<u32>,
    /// Exposure length (1-10)
    #[arg(long)]
    duration: Option<u32>,
    /// Exposure repetitions (1-10)
    #[arg(long)]
    frequency: Option<u32>,
    /// Days applied (1-365)
    #[arg(long)]
    days: Option<u32>,
    /// Learning multiplier in percent per day
    #[arg(long)]
    learning: Option<u32>,
    /// Clamp out-of-range values instead of rejecting them
    #[arg(long)]
    clamp: bool,
}

impl InputArgs {
    fn resolve(&self, config: &Config) -> Result<ModelInputs, Box<dyn std::error::Error>> {
        let defaults = config.default_inputs();
        let raw = ModelInputs::new(
            self.struggle.unwrap_or(defaults.struggle),
            self.duration.unwrap_or(defaults.duration),
            self.frequency.unwrap_or(defaults.frequency),
            self.days.unwrap_or(defaults.days_applied),
            self.learning.unwrap_or(defaults.learning_multiplier),
        );

        let limits = config.limits();
        let inputs = if self.clamp {
            raw.clamp(&limits)
        } else {
            raw.validate(&limits)?;
            raw
        };
        debug!(?inputs, clamp = self.clamp, "resolved simulation inputs");
        Ok(inputs)
    }
}

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct TrajectoryArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Print every Nth day (the last day is always printed)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    every: u32,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

fn horizon_label(config: &Config, inputs: &ModelInputs, breakdown: String) -> String {
    if config.display.show_breakdown {
        breakdown
    } else if inputs.days_applied == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", inputs.days_applied)
    }
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let inputs = args.inputs.resolve(&config)?;
    let model = config.model();
    let outputs = model.evaluate(&inputs)?;

    if args.json {
        let report = json!({
            "inputs": inputs,
            "unit_ratio_policy": model.policy(),
            "daily_response": outputs.daily_response,
            "cumulative_effect": outputs.cumulative_effect,
            "rounded_cumulative_effect": outputs.rounded_cumulative_effect(),
            "duration_breakdown": outputs.duration_breakdown,
            "duration": outputs.duration_breakdown.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let sep = &config.display.thousands_separator;
    println!(
        "Daily Response: {}",
        format_with_separator(f64::from(outputs.daily_response), sep)
    );
    println!(
        "Cumulative Effect (over {}): {}",
        horizon_label(&config, &inputs, outputs.duration_breakdown.to_string()),
        format_with_separator(outputs.rounded_cumulative_effect(), sep)
    );
    Ok(())
}

pub fn run_trajectory(args: TrajectoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let inputs = args.inputs.resolve(&config)?;
    let points = config.model().trajectory(&inputs)?;

    let last_day = inputs.days_applied;
    let selected: Vec<_> = points
        .into_iter()
        .filter(|p| p.day % args.every == 0 || p.day == last_day)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    let sep = &config.display.thousands_separator;
    println!("{:>5}  {:>24}  {:>28}", "Day", "Response", "Cumulative");
    println!("{}", "-".repeat(61));
    for point in selected {
        println!(
            "{:>5}  {:>24}  {:>28}",
            point.day,
            format_with_separator(point.response.round(), sep),
            format_with_separator(point.cumulative.round(), sep)
        );
    }
    Ok(())
}

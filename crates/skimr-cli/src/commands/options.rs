use anyhow::Result;

use skimr_core::profile::{reading_level_options, summary_length_options, INTEREST_CATEGORIES};

pub fn run() -> Result<()> {
    println!("Reading levels:");
    for option in reading_level_options() {
        println!("  {:<10} {}", option.value, option.label);
    }

    println!("\nSummary lengths:");
    for option in summary_length_options() {
        println!("  {:<10} {}", option.value, option.label);
    }

    println!("\nInterest categories:");
    println!("  {}", INTEREST_CATEGORIES.join(", "));

    Ok(())
}

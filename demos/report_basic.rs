//! Basic usage of the SleepReport builder API
//!
//! Parses a recommendation block that is already at hand, once with the
//! dashboard view and once as cards. Fetching from the backend works the same
//! way with `.latest_for(email)` or `.predict(email, answers)`, given a
//! running sleep analysis API (see `SLEEP__API__BASE_URL`).

use sleep_insights::render::render_report;
use sleep_insights::{Report, SleepReport};

const TEXT: &str = "🌟 Sleep Recommendations for Adults (31-50 years)
🚨 **Priority Level: HIGH** - Your sleep effectiveness is 38.4%

1. 🧘 **Stress Management**: Practice mindfulness or journaling before bed
2. ☕ **Caffeine Cut-off**: No caffeine after 2 PM
Switch to herbal tea in the evening

💡 **General Tips:**
• Start with 1-2 recommendations and gradually incorporate more
• Track your sleep improvements over 2-3 weeks
============================================================";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Dashboard ===");
    let report = SleepReport::builder().text(TEXT).build().await?;
    print!("{}", render_report(&report));

    println!("\n=== Cards ===");
    let report = SleepReport::builder().text(TEXT).cards().build().await?;
    if let Report::Cards(cards) = &report {
        println!("{} cards", cards.len());
    }
    print!("{}", render_report(&report));

    Ok(())
}

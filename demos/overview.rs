//! demos/overview.rs
//!
//! Fetches the 7-day forecast for one catalog city and writes the overview
//! charts to standalone HTML files.
//!
//! Requires a Meteoblue API key (METEOBLUE_API_KEY or config.toml).
//!
//! To run: cargo run --example overview

use perucast::{Config, Dashboard, ForecastClient, ViewBody};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let client = ForecastClient::from_config(&config)?;
    let mut dashboard = Dashboard::new(Box::new(client));

    println!("Fetching 7-day forecast for Arequipa...");
    dashboard.select_location("Arequipa (Arequipa)").await?;

    let view = dashboard.overview()?;
    println!("{}", view.heading);

    match view.body {
        ViewBody::Sections(sections) => {
            for (i, section) in sections.iter().enumerate() {
                println!(
                    "{}: max {:.1} {}, min {:.1} {}",
                    section.title,
                    section.summary.max,
                    section.unit,
                    section.summary.min,
                    section.unit
                );
                let path = format!("overview_{i}.html");
                section.chart.write_html(&path);
                println!("  chart written to {path}");
            }
        }
        ViewBody::NoData => println!("{}", perucast::MSG_NO_DATA),
    }

    Ok(())
}

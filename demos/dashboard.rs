//! demos/dashboard.rs
//!
//! Interactive session driving the dashboard state machine from stdin:
//! pick a location, optionally pick a date, and render the overview/detail
//! views as HTML charts.
//!
//! To run: cargo run --example dashboard

use chrono::NaiveDate;
use perucast::{
    about, Config, Dashboard, ForecastClient, PerucastError, View, ViewBody, MSG_NO_DATA,
    MSG_SELECT_DATE, MSG_SELECT_LOCATION,
};
use std::error::Error;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let client = ForecastClient::from_config(&config)?;
    let mut dashboard = Dashboard::new(Box::new(client));

    println!("Peru Regional Telemetry");
    println!("Commands: l=locations  s <n>=select location  d <YYYY-MM-DD>=select date");
    println!("          o=overview  v=detail  c=clear date  x=clear location  a=about  q=quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        let (command, argument) = match input.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (input, ""),
        };

        match command {
            "l" => {
                for (i, label) in dashboard.location_labels().iter().enumerate() {
                    println!("  {i}: {label}");
                }
            }
            "s" => {
                let labels = dashboard.location_labels().to_vec();
                match argument.parse::<usize>().ok().and_then(|i| labels.get(i)) {
                    Some(label) => {
                        if let Err(e) = dashboard.select_location(label).await {
                            report(&e);
                            continue;
                        }
                        println!("Selected {label}.");
                        if let Ok(Some((first, last))) = dashboard.date_bounds() {
                            println!("Forecast covers {first} to {last}.");
                        }
                    }
                    None => println!("Usage: s <index from 'l'>"),
                }
            }
            "d" => match argument.parse::<NaiveDate>() {
                Ok(date) => {
                    if let Err(e) = dashboard.select_date(date) {
                        report(&e);
                    } else {
                        println!("Selected {date}.");
                    }
                }
                Err(_) => println!("Usage: d <YYYY-MM-DD>"),
            },
            "o" => match dashboard.overview() {
                Ok(view) => show_view(&view, "overview"),
                Err(PerucastError::NoLocationSelected) => println!("{MSG_SELECT_LOCATION}"),
                Err(e) => report(&e),
            },
            "v" => match dashboard.detail() {
                Ok(view) => show_view(&view, "detail"),
                Err(PerucastError::NoLocationSelected) => println!("{MSG_SELECT_LOCATION}"),
                Err(PerucastError::NoDateSelected) => println!("{MSG_SELECT_DATE}"),
                Err(e) => report(&e),
            },
            "c" => dashboard.clear_date(),
            "x" => dashboard.clear_location(),
            "a" => println!("{}", about()),
            "q" => break,
            "" => {}
            _ => println!("Unknown command '{command}'."),
        }
    }

    Ok(())
}

fn show_view(view: &View, file_prefix: &str) {
    println!("{}", view.heading);
    match &view.body {
        ViewBody::Sections(sections) => {
            for (i, section) in sections.iter().enumerate() {
                println!(
                    "  {}: max {:.1} {}, min {:.1} {}",
                    section.title,
                    section.summary.max,
                    section.unit,
                    section.summary.min,
                    section.unit
                );
                let path = format!("{file_prefix}_{i}.html");
                section.chart.write_html(&path);
                println!("    chart written to {path}");
            }
        }
        ViewBody::NoData => println!("{MSG_NO_DATA}"),
    }
}

fn report(error: &PerucastError) {
    match error {
        PerucastError::Fetch(e) => println!("{}", e.user_message()),
        other => println!("{other}"),
    }
}

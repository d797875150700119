// Entry point and high-level CLI flow.
//
// Every view is a fresh render: the export is read, cleaned and filtered
// again each time, then the view's tables are exported and previewed.
// Without `--view` the binary loops over a selection menu.
mod company;
mod config;
mod couriers;
mod error;
mod filter;
mod loader;
mod output;
mod pipeline;
mod restaurants;
mod types;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, View};
use error::ReportError;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::Tabled;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::CleanRecord;

/// Print `prompt` and read one trimmed line. `None` once input is exhausted.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Keep asking until a view number is entered. `None` means stop.
fn select_view<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<View>> {
    loop {
        writeln!(out, "Select View:")?;
        writeln!(out, "[1] Company")?;
        writeln!(out, "[2] Couriers")?;
        writeln!(out, "[3] Restaurants\n")?;
        let Some(choice) = ask(input, out, "Enter choice: ")? else {
            return Ok(None);
        };
        match choice.as_str() {
            "1" => return Ok(Some(View::Company)),
            "2" => return Ok(Some(View::Couriers)),
            "3" => return Ok(Some(View::Restaurants)),
            _ => writeln!(out, "Invalid choice. Please enter 1, 2 or 3.\n")?,
        }
    }
}

/// `true` to show the view menu again. End of input counts as no.
fn wants_another_view<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        let Some(answer) = ask(input, out, "Back to View Selection (Y/N): ")? else {
            return Ok(false);
        };
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
        writeln!(out, "Invalid choice. Please enter Y or N.")?;
    }
}

/// Load, clean and filter the export for one render.
fn prepare(cli: &Cli) -> Result<Vec<CleanRecord>, ReportError> {
    let (data, report) = loader::load_and_clean(&cli.input)?;
    println!(
        "Processing dataset... ({} rows loaded, {} kept, {} dropped for missing values)",
        util::format_count(report.total_rows),
        util::format_count(report.kept_rows),
        util::format_count(report.dropped_rows)
    );
    let filtered = filter::apply(&data, &cli.filter_params());
    println!(
        "Filter: orders before {}, traffic {:?} -> {} rows\n",
        cli.date_limit.format(util::ORDER_DATE_FORMAT),
        cli.traffic,
        util::format_count(filtered.len())
    );
    if filtered.is_empty() {
        warn!("filters removed every row; tables will be empty");
    }
    Ok(filtered)
}

/// Export one table to `<output_dir>/<file>` and print its preview.
fn emit<T>(cli: &Cli, file: &str, title: &str, rows: &[T]) -> Result<(), ReportError>
where
    T: Serialize + Tabled + Clone,
{
    output::write_csv(&cli.output_dir.join(file), rows)?;
    output::preview_table(title, rows, cli.preview_rows);
    Ok(())
}

fn render_company(cli: &Cli, data: &[CleanRecord]) -> Result<(), ReportError> {
    println!("Marketplace - Company View\n");
    emit(cli, "company_orders_by_day.csv", "Orders by day", &company::orders_by_day(data))?;
    emit(
        cli,
        "company_traffic_share.csv",
        "Traffic order share",
        &company::traffic_order_share(data),
    )?;
    emit(
        cli,
        "company_traffic_city.csv",
        "Traffic order city",
        &company::traffic_order_city(data),
    )?;
    emit(cli, "company_orders_by_week.csv", "Orders by week", &company::orders_by_week(data))?;
    emit(
        cli,
        "company_orders_per_courier_by_week.csv",
        "Orders per courier by week",
        &company::orders_per_courier_by_week(data),
    )?;
    emit(
        cli,
        "company_geographic_medians.csv",
        "Median delivery location by city and traffic",
        &company::geographic_medians(data),
    )?;

    let summary = company::summary(data);
    let path = cli.output_dir.join("summary.json");
    output::write_json(&path, &summary)?;
    println!("Summary Stats ({}):", path.display());
    println!("{}\n", serde_json::to_string(&summary)?);
    Ok(())
}

fn render_couriers(cli: &Cli, data: &[CleanRecord]) -> Result<(), ReportError> {
    println!("Marketplace - Courier View\n");
    emit(
        cli,
        "couriers_overview.csv",
        "Overall metrics",
        &couriers::overview(data).to_rows(),
    )?;
    emit(
        cli,
        "couriers_mean_rating.csv",
        "Mean rating by courier",
        &couriers::mean_rating_by_courier(data),
    )?;
    emit(
        cli,
        "couriers_rating_by_traffic.csv",
        "Rating by traffic",
        &couriers::rating_by_traffic(data),
    )?;
    emit(
        cli,
        "couriers_rating_by_weather.csv",
        "Rating by weather",
        &couriers::rating_by_weather(data),
    )?;
    emit(
        cli,
        "couriers_fastest.csv",
        "Fastest couriers per city",
        &couriers::top_couriers(data, true),
    )?;
    emit(
        cli,
        "couriers_slowest.csv",
        "Slowest couriers per city",
        &couriers::top_couriers(data, false),
    )?;
    Ok(())
}

fn render_restaurants(cli: &Cli, data: &[CleanRecord]) -> Result<(), ReportError> {
    println!("Marketplace - Restaurant View\n");
    emit(
        cli,
        "restaurants_overview.csv",
        "Overall metrics",
        &restaurants::overview(data).to_rows(),
    )?;
    emit(
        cli,
        "restaurants_time_by_city.csv",
        "Delivery time by city",
        &restaurants::time_by_city(data),
    )?;
    emit(
        cli,
        "restaurants_time_by_city_order_type.csv",
        "Delivery time by city and order type",
        &restaurants::time_by_city_and_order_type(data),
    )?;
    emit(
        cli,
        "restaurants_time_by_city_traffic.csv",
        "Delivery time by city and traffic",
        &restaurants::time_by_city_and_traffic(data),
    )?;
    Ok(())
}

fn render(cli: &Cli, view: View) -> Result<(), ReportError> {
    info!(?view, "rendering view");
    std::fs::create_dir_all(&cli.output_dir)?;
    let data = prepare(cli)?;
    match view {
        View::Company => render_company(cli, &data),
        View::Couriers => render_couriers(cli, &data),
        View::Restaurants => render_restaurants(cli, &data),
    }
}

fn run_menu<R: BufRead, W: Write>(cli: &Cli, input: &mut R, out: &mut W) -> io::Result<()> {
    while let Some(view) = select_view(input, out)? {
        writeln!(out)?;
        out.flush()?;
        if let Err(e) = render(cli, view) {
            eprintln!("Failed to render view: {}\n", e);
        }
        if !wants_another_view(input, out)? {
            break;
        }
    }
    writeln!(out, "Exiting the program.")?;
    out.flush()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.view {
        Some(view) => render(&cli, view).with_context(|| {
            format!("failed to render {:?} view from {}", view, cli.input.display())
        }),
        None => run_menu(&cli, &mut io::stdin().lock(), &mut io::stdout())
            .context("interactive menu failed"),
    }
}

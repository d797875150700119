use crate::filter::FilterParams;
use crate::types::TrafficDensity;
use crate::util::parse_order_date;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Company,
    Couriers,
    Restaurants,
}

#[derive(Debug, Parser)]
#[command(name = "delivery_report")]
#[command(about = "Cleans a food-delivery export and prints company, courier and restaurant reports")]
pub struct Cli {
    /// Delivery export to read
    #[arg(short, long, env = "DELIVERY_DATASET", default_value = "dataset/train.csv")]
    pub input: PathBuf,

    /// Keep orders strictly before this date (DD-MM-YYYY)
    #[arg(long, default_value = "13-04-2022", value_parser = parse_date_limit)]
    pub date_limit: NaiveDate,

    /// Traffic levels to keep
    #[arg(long, value_enum, num_args = 1.., default_values_t = TrafficDensity::ALL.to_vec())]
    pub traffic: Vec<TrafficDensity>,

    /// Render one view and exit instead of showing the menu
    #[arg(long, value_enum)]
    pub view: Option<View>,

    /// Directory for CSV and JSON exports
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Rows shown per table in the console preview
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,
}

impl Cli {
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            date_limit: self.date_limit,
            traffic: self.traffic.clone(),
        }
    }
}

fn parse_date_limit(s: &str) -> Result<NaiveDate, String> {
    parse_order_date(s).ok_or_else(|| format!("`{}` is not a DD-MM-YYYY date", s))
}

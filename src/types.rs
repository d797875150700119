use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// Marker the source export writes for a missing value. The trailing space
/// is part of the marker.
pub const SENTINEL: &str = "NaN ";

pub const COL_ID: &str = "ID";
pub const COL_COURIER_ID: &str = "Delivery_person_ID";
pub const COL_AGE: &str = "Delivery_person_Age";
pub const COL_RATINGS: &str = "Delivery_person_Ratings";
pub const COL_RESTAURANT_LAT: &str = "Restaurant_latitude";
pub const COL_RESTAURANT_LON: &str = "Restaurant_longitude";
pub const COL_DELIVERY_LAT: &str = "Delivery_location_latitude";
pub const COL_DELIVERY_LON: &str = "Delivery_location_longitude";
pub const COL_ORDER_DATE: &str = "Order_Date";
pub const COL_WEATHER: &str = "Weatherconditions";
pub const COL_TRAFFIC: &str = "Road_traffic_density";
pub const COL_VEHICLE_CONDITION: &str = "Vehicle_condition";
pub const COL_ORDER_TYPE: &str = "Type_of_order";
pub const COL_VEHICLE_TYPE: &str = "Type_of_vehicle";
pub const COL_MULTIPLE_DELIVERIES: &str = "multiple_deliveries";
pub const COL_FESTIVAL: &str = "Festival";
pub const COL_CITY: &str = "City";
pub const COL_TIME_TAKEN: &str = "Time_taken(min)";

/// Columns that must be present in the header, spelled exactly.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    COL_ID,
    COL_COURIER_ID,
    COL_AGE,
    COL_RATINGS,
    COL_RESTAURANT_LAT,
    COL_RESTAURANT_LON,
    COL_DELIVERY_LAT,
    COL_DELIVERY_LON,
    COL_ORDER_DATE,
    COL_WEATHER,
    COL_TRAFFIC,
    COL_ORDER_TYPE,
    COL_VEHICLE_TYPE,
    COL_MULTIPLE_DELIVERIES,
    COL_FESTIVAL,
    COL_CITY,
    COL_TIME_TAKEN,
];

/// One row of the export exactly as delivered. Every cell is kept as text
/// so the sentinel check sees the raw bytes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_ratings: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_location_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_location_longitude: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weatherconditions: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition", default)]
    pub vehicle_condition: Option<String>,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum TrafficDensity {
    Low,
    Medium,
    High,
    Jam,
}

impl TrafficDensity {
    pub const ALL: [TrafficDensity; 4] = [
        TrafficDensity::Low,
        TrafficDensity::Medium,
        TrafficDensity::High,
        TrafficDensity::Jam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficDensity::Low => "Low",
            TrafficDensity::Medium => "Medium",
            TrafficDensity::High => "High",
            TrafficDensity::Jam => "Jam",
        }
    }
}

impl FromStr for TrafficDensity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrafficDensity::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for TrafficDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// City class of the delivery area. `Metropolitian` keeps the source
/// spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    Metropolitian,
    Urban,
    #[serde(rename = "Semi-Urban")]
    SemiUrban,
}

impl City {
    pub const ALL: [City; 3] = [City::Metropolitian, City::Urban, City::SemiUrban];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Metropolitian => "Metropolitian",
            City::Urban => "Urban",
            City::SemiUrban => "Semi-Urban",
        }
    }
}

impl FromStr for City {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub id: String,
    pub delivery_person_id: String,
    pub delivery_person_age: u32,
    pub delivery_person_ratings: Option<f64>,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
    pub delivery_location_latitude: f64,
    pub delivery_location_longitude: f64,
    pub order_date: NaiveDate,
    pub weatherconditions: String,
    pub road_traffic_density: TrafficDensity,
    pub vehicle_condition: Option<i32>,
    pub type_of_order: String,
    pub type_of_vehicle: String,
    pub multiple_deliveries: u32,
    pub festival: String,
    pub city: City,
    pub time_taken_min: u32,
}

// ---------------------------------------------------------------------------
// Report rows. Numbers are pre-formatted so the CSV export and the console
// preview show the same text.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MetricRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DailyOrdersRow {
    #[serde(rename = "OrderDate")]
    #[tabled(rename = "OrderDate")]
    pub order_date: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct TrafficShareRow {
    #[serde(rename = "RoadTrafficDensity")]
    #[tabled(rename = "RoadTrafficDensity")]
    pub traffic: TrafficDensity,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityTrafficOrdersRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "RoadTrafficDensity")]
    #[tabled(rename = "RoadTrafficDensity")]
    pub traffic: TrafficDensity,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeeklyOrdersRow {
    #[serde(rename = "WeekOfYear")]
    #[tabled(rename = "WeekOfYear")]
    pub week: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeeklyCourierLoadRow {
    #[serde(rename = "WeekOfYear")]
    #[tabled(rename = "WeekOfYear")]
    pub week: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Couriers")]
    #[tabled(rename = "Couriers")]
    pub couriers: usize,
    #[serde(rename = "OrdersPerCourier")]
    #[tabled(rename = "OrdersPerCourier")]
    pub orders_per_courier: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct GeoMedianRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "RoadTrafficDensity")]
    #[tabled(rename = "RoadTrafficDensity")]
    pub traffic: TrafficDensity,
    #[serde(rename = "MedianLatitude")]
    #[tabled(rename = "MedianLatitude")]
    pub latitude: String,
    #[serde(rename = "MedianLongitude")]
    #[tabled(rename = "MedianLongitude")]
    pub longitude: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CourierRatingRow {
    #[serde(rename = "DeliveryPersonID")]
    #[tabled(rename = "DeliveryPersonID")]
    pub courier_id: String,
    #[serde(rename = "MeanRating")]
    #[tabled(rename = "MeanRating")]
    pub mean_rating: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct TrafficRatingRow {
    #[serde(rename = "RoadTrafficDensity")]
    #[tabled(rename = "RoadTrafficDensity")]
    pub traffic: TrafficDensity,
    #[serde(rename = "MeanRating")]
    #[tabled(rename = "MeanRating")]
    pub mean_rating: String,
    #[serde(rename = "StdRating")]
    #[tabled(rename = "StdRating")]
    pub std_rating: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeatherRatingRow {
    #[serde(rename = "Weatherconditions")]
    #[tabled(rename = "Weatherconditions")]
    pub weather: String,
    #[serde(rename = "MeanRating")]
    #[tabled(rename = "MeanRating")]
    pub mean_rating: String,
    #[serde(rename = "StdRating")]
    #[tabled(rename = "StdRating")]
    pub std_rating: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CourierSpeedRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "DeliveryPersonID")]
    #[tabled(rename = "DeliveryPersonID")]
    pub courier_id: String,
    #[serde(rename = "AvgTime")]
    #[tabled(rename = "AvgTime")]
    pub avg_time: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityTimeRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "AvgTime")]
    #[tabled(rename = "AvgTime")]
    pub avg_time: String,
    #[serde(rename = "StdTime")]
    #[tabled(rename = "StdTime")]
    pub std_time: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityOrderTypeTimeRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "TypeOfOrder")]
    #[tabled(rename = "TypeOfOrder")]
    pub type_of_order: String,
    #[serde(rename = "AvgTime")]
    #[tabled(rename = "AvgTime")]
    pub avg_time: String,
    #[serde(rename = "StdTime")]
    #[tabled(rename = "StdTime")]
    pub std_time: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityTrafficTimeRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: City,
    #[serde(rename = "RoadTrafficDensity")]
    #[tabled(rename = "RoadTrafficDensity")]
    pub traffic: TrafficDensity,
    #[serde(rename = "AvgTime")]
    #[tabled(rename = "AvgTime")]
    pub avg_time: String,
    #[serde(rename = "StdTime")]
    #[tabled(rename = "StdTime")]
    pub std_time: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CompanySummary {
    pub total_orders: usize,
    pub unique_couriers: usize,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    pub avg_time_taken_min: Option<f64>,
}

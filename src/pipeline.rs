//! Normalization of raw delivery rows into typed, trimmed records.
//!
//! Rows carrying the `"NaN "` marker in any monitored column are dropped
//! before any coercion runs. Every other row must coerce cleanly; the first
//! cell that does not aborts the whole run with a
//! [`ReportError::MalformedValue`]. A missing rating (`NaN`) is not a
//! coercion failure: it is kept as `None` and skipped by rating statistics.

use crate::error::ReportError;
use crate::types::{
    City, CleanRecord, RawRow, TrafficDensity, COL_AGE, COL_CITY, COL_DELIVERY_LAT,
    COL_DELIVERY_LON, COL_FESTIVAL, COL_MULTIPLE_DELIVERIES, COL_ORDER_DATE, COL_RATINGS,
    COL_RESTAURANT_LAT, COL_RESTAURANT_LON, COL_TIME_TAKEN, COL_TRAFFIC, COL_VEHICLE_CONDITION,
    SENTINEL,
};
use crate::util::{
    extract_minutes, parse_f64_strict, parse_i32_strict, parse_optional_f64, parse_order_date,
    parse_u32_strict,
};
use tracing::{debug, info};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub records: Vec<CleanRecord>,
    pub dropped: usize,
}

/// Name of the first monitored column holding the sentinel, if any.
pub fn sentinel_column(row: &RawRow) -> Option<&'static str> {
    [
        (COL_AGE, row.delivery_person_age.as_str()),
        (COL_TRAFFIC, row.road_traffic_density.as_str()),
        (COL_CITY, row.city.as_str()),
        (COL_FESTIVAL, row.festival.as_str()),
        (COL_MULTIPLE_DELIVERIES, row.multiple_deliveries.as_str()),
    ]
    .into_iter()
    .find(|(_, value)| *value == SENTINEL)
    .map(|(column, _)| column)
}

/// Clean a whole table. `rows` is consumed; the returned records keep the
/// input order. Row numbers in errors are 1-based data rows.
pub fn clean(rows: Vec<RawRow>) -> Result<Cleaned, ReportError> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for (idx, row) in rows.into_iter().enumerate() {
        let row_no = idx + 1;
        if let Some(column) = sentinel_column(&row) {
            debug!(row = row_no, column, "dropping row with missing-value marker");
            dropped += 1;
            continue;
        }
        records.push(clean_row(row, row_no)?);
    }

    info!(total, kept = records.len(), dropped, "normalized delivery table");
    Ok(Cleaned { records, dropped })
}

/// Coerce and trim a single row that already passed the sentinel check.
pub fn clean_row(row: RawRow, row_no: usize) -> Result<CleanRecord, ReportError> {
    let delivery_person_age = parse_u32_strict(&row.delivery_person_age).ok_or_else(|| {
        ReportError::malformed(COL_AGE, row_no, &row.delivery_person_age, "expected an integer")
    })?;
    let delivery_person_ratings =
        parse_optional_f64(&row.delivery_person_ratings).map_err(|_| {
            ReportError::malformed(
                COL_RATINGS,
                row_no,
                &row.delivery_person_ratings,
                "expected a number or NaN",
            )
        })?;
    let multiple_deliveries = parse_u32_strict(&row.multiple_deliveries).ok_or_else(|| {
        ReportError::malformed(
            COL_MULTIPLE_DELIVERIES,
            row_no,
            &row.multiple_deliveries,
            "expected an integer",
        )
    })?;
    let order_date = parse_order_date(&row.order_date).ok_or_else(|| {
        ReportError::malformed(COL_ORDER_DATE, row_no, &row.order_date, "expected DD-MM-YYYY")
    })?;
    let time_taken_min = extract_minutes(&row.time_taken).ok_or_else(|| {
        ReportError::malformed(
            COL_TIME_TAKEN,
            row_no,
            &row.time_taken,
            "expected `(min) ` followed by a minute count",
        )
    })?;

    let coord = |column: &'static str, raw: &str| {
        parse_f64_strict(raw)
            .ok_or_else(|| ReportError::malformed(column, row_no, raw, "expected a coordinate"))
    };
    let restaurant_latitude = coord(COL_RESTAURANT_LAT, &row.restaurant_latitude)?;
    let restaurant_longitude = coord(COL_RESTAURANT_LON, &row.restaurant_longitude)?;
    let delivery_location_latitude = coord(COL_DELIVERY_LAT, &row.delivery_location_latitude)?;
    let delivery_location_longitude = coord(COL_DELIVERY_LON, &row.delivery_location_longitude)?;

    let vehicle_condition = match row.vehicle_condition.as_deref() {
        None => None,
        Some(raw) => Some(parse_i32_strict(raw).ok_or_else(|| {
            ReportError::malformed(COL_VEHICLE_CONDITION, row_no, raw, "expected an integer")
        })?),
    };

    let traffic = row.road_traffic_density.trim();
    let road_traffic_density: TrafficDensity = traffic.parse().map_err(|_| {
        ReportError::malformed(
            COL_TRAFFIC,
            row_no,
            &row.road_traffic_density,
            "expected one of Low, Medium, High, Jam",
        )
    })?;
    let city: City = row.city.trim().parse().map_err(|_| {
        ReportError::malformed(
            COL_CITY,
            row_no,
            &row.city,
            "expected one of Metropolitian, Urban, Semi-Urban",
        )
    })?;

    Ok(CleanRecord {
        id: row.id.trim().to_string(),
        delivery_person_id: row.delivery_person_id,
        delivery_person_age,
        delivery_person_ratings,
        restaurant_latitude,
        restaurant_longitude,
        delivery_location_latitude,
        delivery_location_longitude,
        order_date,
        weatherconditions: row.weatherconditions.trim().to_string(),
        road_traffic_density,
        vehicle_condition,
        type_of_order: row.type_of_order.trim().to_string(),
        type_of_vehicle: row.type_of_vehicle.trim().to_string(),
        multiple_deliveries,
        festival: row.festival.trim().to_string(),
        city,
        time_taken_min,
    })
}

//! Company-wide view: order volume over time, traffic mix and where
//! deliveries end up.

use crate::types::{
    CityTrafficOrdersRow, CleanRecord, CompanySummary, DailyOrdersRow, GeoMedianRow,
    TrafficShareRow, WeeklyCourierLoadRow, WeeklyOrdersRow,
};
use crate::util::{format_number, format_opt, mean, median, week_of_year};
use std::collections::{BTreeMap, HashSet};

pub fn orders_by_day(data: &[CleanRecord]) -> Vec<DailyOrdersRow> {
    let mut map: BTreeMap<_, usize> = BTreeMap::new();
    for r in data {
        *map.entry(r.order_date).or_default() += 1;
    }
    map.into_iter()
        .map(|(date, orders)| DailyOrdersRow {
            order_date: date.format("%Y-%m-%d").to_string(),
            orders,
        })
        .collect()
}

pub fn traffic_order_share(data: &[CleanRecord]) -> Vec<TrafficShareRow> {
    let mut map: BTreeMap<_, usize> = BTreeMap::new();
    for r in data {
        *map.entry(r.road_traffic_density).or_default() += 1;
    }
    let total = data.len() as f64;
    map.into_iter()
        .map(|(traffic, orders)| TrafficShareRow {
            traffic,
            orders,
            share: format_number(orders as f64 / total, 4),
        })
        .collect()
}

pub fn traffic_order_city(data: &[CleanRecord]) -> Vec<CityTrafficOrdersRow> {
    let mut map: BTreeMap<_, usize> = BTreeMap::new();
    for r in data {
        *map.entry((r.city, r.road_traffic_density)).or_default() += 1;
    }
    map.into_iter()
        .map(|((city, traffic), orders)| CityTrafficOrdersRow {
            city,
            traffic,
            orders,
        })
        .collect()
}

pub fn orders_by_week(data: &[CleanRecord]) -> Vec<WeeklyOrdersRow> {
    let mut map: BTreeMap<String, usize> = BTreeMap::new();
    for r in data {
        *map.entry(week_of_year(r.order_date)).or_default() += 1;
    }
    map.into_iter()
        .map(|(week, orders)| WeeklyOrdersRow { week, orders })
        .collect()
}

/// Orders divided by distinct couriers active in each week.
pub fn orders_per_courier_by_week(data: &[CleanRecord]) -> Vec<WeeklyCourierLoadRow> {
    let mut map: BTreeMap<String, (usize, HashSet<&str>)> = BTreeMap::new();
    for r in data {
        let e = map.entry(week_of_year(r.order_date)).or_default();
        e.0 += 1;
        e.1.insert(r.delivery_person_id.as_str());
    }
    map.into_iter()
        .map(|(week, (orders, couriers))| WeeklyCourierLoadRow {
            week,
            orders,
            couriers: couriers.len(),
            orders_per_courier: format_number(orders as f64 / couriers.len() as f64, 2),
        })
        .collect()
}

/// Median delivery location per (city, traffic) pair.
pub fn geographic_medians(data: &[CleanRecord]) -> Vec<GeoMedianRow> {
    let mut map: BTreeMap<_, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in data {
        let e = map.entry((r.city, r.road_traffic_density)).or_default();
        e.0.push(r.delivery_location_latitude);
        e.1.push(r.delivery_location_longitude);
    }
    map.into_iter()
        .map(|((city, traffic), (mut lats, mut lons))| GeoMedianRow {
            city,
            traffic,
            latitude: format_opt(median(&mut lats), 6),
            longitude: format_opt(median(&mut lons), 6),
        })
        .collect()
}

pub fn summary(data: &[CleanRecord]) -> CompanySummary {
    let couriers: HashSet<&str> = data.iter().map(|r| r.delivery_person_id.as_str()).collect();
    let times: Vec<f64> = data.iter().map(|r| r.time_taken_min as f64).collect();
    CompanySummary {
        total_orders: data.len(),
        unique_couriers: couriers.len(),
        first_order_date: data.iter().map(|r| r.order_date).min(),
        last_order_date: data.iter().map(|r| r.order_date).max(),
        avg_time_taken_min: mean(&times),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{clean_row, tests::raw_row};
    use crate::types::{City, TrafficDensity};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(courier: &str, date: &str, city: &str, traffic: &str) -> CleanRecord {
        let mut raw = raw_row("x");
        raw.delivery_person_id = courier.to_string();
        raw.order_date = date.to_string();
        raw.city = city.to_string();
        raw.road_traffic_density = traffic.to_string();
        clean_row(raw, 1).unwrap()
    }

    fn sample() -> Vec<CleanRecord> {
        vec![
            record("A", "06-03-2022", "Urban", "Low"),
            record("B", "06-03-2022", "Urban", "Jam"),
            record("A", "07-03-2022", "Metropolitian", "Jam"),
            record("C", "13-03-2022", "Urban", "Jam"),
        ]
    }

    #[test]
    fn counts_orders_per_day_in_date_order() {
        let rows = orders_by_day(&sample());
        let got: Vec<(&str, usize)> = rows
            .iter()
            .map(|r| (r.order_date.as_str(), r.orders))
            .collect();
        assert_eq!(
            got,
            vec![("2022-03-06", 2), ("2022-03-07", 1), ("2022-03-13", 1)]
        );
    }

    #[test]
    fn traffic_share_sums_to_one() {
        let rows = traffic_order_share(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].traffic, TrafficDensity::Low);
        assert_eq!(rows[0].share, "0.2500");
        assert_eq!(rows[1].traffic, TrafficDensity::Jam);
        assert_eq!(rows[1].orders, 3);
        assert_eq!(rows[1].share, "0.7500");
    }

    #[test]
    fn groups_orders_by_city_and_traffic() {
        let rows = traffic_order_city(&sample());
        assert_eq!(
            rows,
            vec![
                CityTrafficOrdersRow { city: City::Metropolitian, traffic: TrafficDensity::Jam, orders: 1 },
                CityTrafficOrdersRow { city: City::Urban, traffic: TrafficDensity::Low, orders: 1 },
                CityTrafficOrdersRow { city: City::Urban, traffic: TrafficDensity::Jam, orders: 2 },
            ]
        );
    }

    #[test]
    fn weekly_load_divides_by_distinct_couriers() {
        // 2022-03-06 and 2022-03-13 are Sundays, so each starts a new week.
        let rows = orders_per_courier_by_week(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].week, "10");
        assert_eq!(rows[0].orders, 3);
        assert_eq!(rows[0].couriers, 2);
        assert_eq!(rows[0].orders_per_courier, "1.50");
        assert_eq!(rows[1].week, "11");
        assert_eq!(rows[1].orders_per_courier, "1.00");

        let weekly = orders_by_week(&sample());
        assert_eq!(weekly.iter().map(|w| w.orders).sum::<usize>(), 4);
    }

    #[test]
    fn geographic_median_per_group() {
        let mut data = sample();
        data[1].delivery_location_latitude = 10.0;
        data[3].delivery_location_latitude = 20.0;
        let rows = geographic_medians(&data);
        let jam_urban = rows
            .iter()
            .find(|r| r.city == City::Urban && r.traffic == TrafficDensity::Jam)
            .unwrap();
        assert_eq!(jam_urban.latitude, "15.000000");
    }

    #[test]
    fn summary_covers_range_and_couriers() {
        let s = summary(&sample());
        assert_eq!(s.total_orders, 4);
        assert_eq!(s.unique_couriers, 3);
        assert_eq!(s.first_order_date, NaiveDate::from_ymd_opt(2022, 3, 6));
        assert_eq!(s.last_order_date, NaiveDate::from_ymd_opt(2022, 3, 13));
        assert_eq!(s.avg_time_taken_min, Some(25.0));
    }

    #[test]
    fn empty_table_gives_empty_results() {
        assert!(orders_by_day(&[]).is_empty());
        assert!(traffic_order_share(&[]).is_empty());
        assert!(traffic_order_city(&[]).is_empty());
        assert!(orders_by_week(&[]).is_empty());
        assert!(orders_per_courier_by_week(&[]).is_empty());
        assert!(geographic_medians(&[]).is_empty());
        let s = summary(&[]);
        assert_eq!(s.total_orders, 0);
        assert_eq!(s.avg_time_taken_min, None);
    }
}

//! Courier view: age and vehicle extremes, ratings and delivery speed.

use crate::types::{
    City, CleanRecord, CourierRatingRow, CourierSpeedRow, MetricRow, TrafficRatingRow,
    WeatherRatingRow,
};
use crate::util::{format_number, format_opt, mean, sample_std_dev};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How many couriers each city contributes to the speed rankings.
pub const TOP_PER_CITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourierOverview {
    pub oldest: Option<u32>,
    pub youngest: Option<u32>,
    pub best_vehicle_condition: Option<i32>,
    pub worst_vehicle_condition: Option<i32>,
}

impl CourierOverview {
    pub fn to_rows(&self) -> Vec<MetricRow> {
        let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
        vec![
            MetricRow {
                metric: "Oldest courier".to_string(),
                value: show(self.oldest.map(|v| v.to_string())),
            },
            MetricRow {
                metric: "Youngest courier".to_string(),
                value: show(self.youngest.map(|v| v.to_string())),
            },
            MetricRow {
                metric: "Best vehicle condition".to_string(),
                value: show(self.best_vehicle_condition.map(|v| v.to_string())),
            },
            MetricRow {
                metric: "Worst vehicle condition".to_string(),
                value: show(self.worst_vehicle_condition.map(|v| v.to_string())),
            },
        ]
    }
}

pub fn overview(data: &[CleanRecord]) -> CourierOverview {
    CourierOverview {
        oldest: data.iter().map(|r| r.delivery_person_age).max(),
        youngest: data.iter().map(|r| r.delivery_person_age).min(),
        best_vehicle_condition: data.iter().filter_map(|r| r.vehicle_condition).max(),
        worst_vehicle_condition: data.iter().filter_map(|r| r.vehicle_condition).min(),
    }
}

/// Group ratings by `key`. Rows without a rating still open their group
/// but add nothing to it, so a group can end up empty.
fn ratings_by<'a, K, F>(data: &'a [CleanRecord], key: F) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    F: Fn(&'a CleanRecord) -> K,
{
    let mut map: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for r in data {
        let ratings = map.entry(key(r)).or_default();
        if let Some(v) = r.delivery_person_ratings {
            ratings.push(v);
        }
    }
    map
}

pub fn mean_rating_by_courier(data: &[CleanRecord]) -> Vec<CourierRatingRow> {
    ratings_by(data, |r| r.delivery_person_id.as_str())
        .into_iter()
        .map(|(id, ratings)| CourierRatingRow {
            courier_id: id.to_string(),
            mean_rating: format_opt(mean(&ratings), 2),
        })
        .collect()
}

pub fn rating_by_traffic(data: &[CleanRecord]) -> Vec<TrafficRatingRow> {
    ratings_by(data, |r| r.road_traffic_density)
        .into_iter()
        .map(|(traffic, ratings)| TrafficRatingRow {
            traffic,
            mean_rating: format_opt(mean(&ratings), 2),
            std_rating: format_opt(sample_std_dev(&ratings), 2),
        })
        .collect()
}

pub fn rating_by_weather(data: &[CleanRecord]) -> Vec<WeatherRatingRow> {
    ratings_by(data, |r| r.weatherconditions.as_str())
        .into_iter()
        .map(|(weather, ratings)| WeatherRatingRow {
            weather: weather.to_string(),
            mean_rating: format_opt(mean(&ratings), 2),
            std_rating: format_opt(sample_std_dev(&ratings), 2),
        })
        .collect()
}

/// Mean delivery time per courier within each city, best `TOP_PER_CITY`
/// per city. `fastest` picks the lowest means, otherwise the highest.
/// Cities come out as Metropolitian, Urban, Semi-Urban.
pub fn top_couriers(data: &[CleanRecord], fastest: bool) -> Vec<CourierSpeedRow> {
    let mut map: BTreeMap<(City, &str), Vec<f64>> = BTreeMap::new();
    for r in data {
        map.entry((r.city, r.delivery_person_id.as_str()))
            .or_default()
            .push(r.time_taken_min as f64);
    }

    let mut by_city: BTreeMap<City, Vec<(&str, f64)>> = BTreeMap::new();
    for ((city, id), times) in map {
        if let Some(avg) = mean(&times) {
            by_city.entry(city).or_default().push((id, avg));
        }
    }

    let mut rows = Vec::new();
    for (city, mut couriers) in by_city {
        couriers.sort_by(|a, b| {
            let ord = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
            let ord = if fastest { ord } else { ord.reverse() };
            ord.then_with(|| a.0.cmp(b.0))
        });
        rows.extend(
            couriers
                .into_iter()
                .take(TOP_PER_CITY)
                .map(|(id, avg)| CourierSpeedRow {
                    city,
                    courier_id: id.to_string(),
                    avg_time: format_number(avg, 2),
                }),
        );
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{clean_row, tests::raw_row};
    use crate::types::TrafficDensity;
    use pretty_assertions::assert_eq;

    fn record(courier: &str, city: &str, minutes: u32, rating: &str) -> CleanRecord {
        let mut raw = raw_row("x");
        raw.delivery_person_id = courier.to_string();
        raw.city = city.to_string();
        raw.time_taken = format!("(min) {}", minutes);
        raw.delivery_person_ratings = rating.to_string();
        clean_row(raw, 1).unwrap()
    }

    #[test]
    fn overview_reports_extremes() {
        let mut a = record("A", "Urban", 20, "4.0");
        a.delivery_person_age = 22;
        a.vehicle_condition = Some(0);
        let mut b = record("B", "Urban", 20, "4.0");
        b.delivery_person_age = 39;
        b.vehicle_condition = None;
        let o = overview(&[a, b]);
        assert_eq!(o.oldest, Some(39));
        assert_eq!(o.youngest, Some(22));
        assert_eq!(o.best_vehicle_condition, Some(0));
        assert_eq!(o.worst_vehicle_condition, Some(0));
        assert_eq!(o.to_rows().len(), 4);
    }

    #[test]
    fn overview_of_empty_table_has_no_values() {
        let o = overview(&[]);
        assert_eq!(o, CourierOverview::default());
        assert!(o.to_rows().iter().all(|row| row.value == "-"));
    }

    #[test]
    fn averages_rating_per_courier() {
        let data = vec![
            record("B", "Urban", 20, "4.0"),
            record("A", "Urban", 20, "5.0"),
            record("B", "Urban", 20, "5.0"),
        ];
        let rows = mean_rating_by_courier(&data);
        assert_eq!(
            rows,
            vec![
                CourierRatingRow { courier_id: "A".into(), mean_rating: "5.00".into() },
                CourierRatingRow { courier_id: "B".into(), mean_rating: "4.50".into() },
            ]
        );
    }

    #[test]
    fn rating_stats_by_traffic_and_weather() {
        let mut data = vec![
            record("A", "Urban", 20, "4.0"),
            record("B", "Urban", 20, "5.0"),
            record("C", "Urban", 20, "3.0"),
        ];
        data[2].road_traffic_density = TrafficDensity::Jam;
        data[2].weatherconditions = "conditions Fog".to_string();

        let traffic = rating_by_traffic(&data);
        assert_eq!(traffic[0].traffic, TrafficDensity::High);
        assert_eq!(traffic[0].mean_rating, "4.50");
        assert_eq!(traffic[0].std_rating, "0.71");
        assert_eq!(traffic[1].std_rating, "-");

        let weather = rating_by_weather(&data);
        assert_eq!(weather[0].weather, "conditions Fog");
        assert_eq!(weather[1].weather, "conditions Sunny");
        assert_eq!(weather[1].mean_rating, "4.50");
    }

    #[test]
    fn missing_ratings_are_skipped() {
        let data = vec![
            record("A", "Urban", 20, "4.0"),
            record("A", "Urban", 20, "NaN "),
            record("A", "Urban", 20, "5.0"),
            record("B", "Urban", 20, "NaN "),
        ];
        let rows = mean_rating_by_courier(&data);
        assert_eq!(
            rows,
            vec![
                CourierRatingRow { courier_id: "A".into(), mean_rating: "4.50".into() },
                CourierRatingRow { courier_id: "B".into(), mean_rating: "-".into() },
            ]
        );

        let traffic = rating_by_traffic(&data);
        assert_eq!(traffic.len(), 1);
        assert_eq!(traffic[0].mean_rating, "4.50");
        assert_eq!(traffic[0].std_rating, "0.71");

        let weather = rating_by_weather(&data[1..2]);
        assert_eq!(weather[0].mean_rating, "-");
        assert_eq!(weather[0].std_rating, "-");
    }

    #[test]
    fn ranks_fastest_and_slowest_per_city() {
        let data = vec![
            record("U1", "Urban", 30, "4.0"),
            record("U2", "Urban", 10, "4.0"),
            record("M1", "Metropolitian", 25, "4.0"),
            record("S1", "Semi-Urban", 40, "4.0"),
            record("U1", "Urban", 10, "4.0"),
        ];
        let fast = top_couriers(&data, true);
        let got: Vec<(City, &str, &str)> = fast
            .iter()
            .map(|r| (r.city, r.courier_id.as_str(), r.avg_time.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (City::Metropolitian, "M1", "25.00"),
                (City::Urban, "U2", "10.00"),
                (City::Urban, "U1", "20.00"),
                (City::SemiUrban, "S1", "40.00"),
            ]
        );

        let slow = top_couriers(&data, false);
        assert_eq!(slow[1].courier_id, "U1");
        assert_eq!(slow[2].courier_id, "U2");
    }

    #[test]
    fn caps_each_city_at_ten() {
        let data: Vec<CleanRecord> = (0..15)
            .map(|i| record(&format!("C{:02}", i), "Urban", 10 + i, "4.0"))
            .collect();
        let rows = top_couriers(&data, true);
        assert_eq!(rows.len(), TOP_PER_CITY);
        assert_eq!(rows[0].courier_id, "C00");
        assert_eq!(rows[9].courier_id, "C09");
    }

    #[test]
    fn empty_table_gives_empty_rankings() {
        assert!(mean_rating_by_courier(&[]).is_empty());
        assert!(rating_by_traffic(&[]).is_empty());
        assert!(rating_by_weather(&[]).is_empty());
        assert!(top_couriers(&[], true).is_empty());
    }
}

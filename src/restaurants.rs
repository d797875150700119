//! Restaurant view: delivery-time statistics by festival, city, order type
//! and traffic.

use crate::types::{
    CityOrderTypeTimeRow, CityTimeRow, CityTrafficTimeRow, CleanRecord, MetricRow,
};
use crate::util::{format_count, format_number, format_opt, mean, sample_std_dev};
use std::collections::{BTreeMap, HashSet};

/// Mean and sample standard deviation of one group of delivery times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStats {
    pub mean: f64,
    pub std: Option<f64>,
}

impl TimeStats {
    fn of(times: &[f64]) -> Option<Self> {
        Some(TimeStats {
            mean: mean(times)?,
            std: sample_std_dev(times),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestaurantOverview {
    pub unique_couriers: usize,
    pub festival: Option<TimeStats>,
    pub no_festival: Option<TimeStats>,
}

impl RestaurantOverview {
    pub fn to_rows(&self) -> Vec<MetricRow> {
        let mean = |s: Option<TimeStats>| format_opt(s.map(|s| s.mean), 1);
        let std = |s: Option<TimeStats>| format_opt(s.and_then(|s| s.std), 1);
        vec![
            MetricRow {
                metric: "Unique couriers".to_string(),
                value: format_count(self.unique_couriers),
            },
            MetricRow {
                metric: "Avg time with festival".to_string(),
                value: mean(self.festival),
            },
            MetricRow {
                metric: "Avg time without festival".to_string(),
                value: mean(self.no_festival),
            },
            MetricRow {
                metric: "Std time with festival".to_string(),
                value: std(self.festival),
            },
            MetricRow {
                metric: "Std time without festival".to_string(),
                value: std(self.no_festival),
            },
        ]
    }
}

fn times_where<F>(data: &[CleanRecord], pred: F) -> Vec<f64>
where
    F: Fn(&CleanRecord) -> bool,
{
    data.iter()
        .filter(|r| pred(*r))
        .map(|r| r.time_taken_min as f64)
        .collect()
}

pub fn overview(data: &[CleanRecord]) -> RestaurantOverview {
    let couriers: HashSet<&str> = data.iter().map(|r| r.delivery_person_id.as_str()).collect();
    RestaurantOverview {
        unique_couriers: couriers.len(),
        festival: TimeStats::of(&times_where(data, |r| r.festival == "Yes")),
        no_festival: TimeStats::of(&times_where(data, |r| r.festival == "No")),
    }
}

/// Group delivery times by `key` and reduce each group to [`TimeStats`].
fn time_stats_by<K, F>(data: &[CleanRecord], key: F) -> Vec<(K, TimeStats)>
where
    K: Ord,
    F: Fn(&CleanRecord) -> K,
{
    let mut map: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for r in data {
        map.entry(key(r)).or_default().push(r.time_taken_min as f64);
    }
    map.into_iter()
        .filter_map(|(k, times)| TimeStats::of(&times).map(|s| (k, s)))
        .collect()
}

pub fn time_by_city(data: &[CleanRecord]) -> Vec<CityTimeRow> {
    time_stats_by(data, |r| r.city)
        .into_iter()
        .map(|(city, s)| CityTimeRow {
            city,
            avg_time: format_number(s.mean, 2),
            std_time: format_opt(s.std, 2),
        })
        .collect()
}

pub fn time_by_city_and_order_type(data: &[CleanRecord]) -> Vec<CityOrderTypeTimeRow> {
    time_stats_by(data, |r| (r.city, r.type_of_order.clone()))
        .into_iter()
        .map(|((city, type_of_order), s)| CityOrderTypeTimeRow {
            city,
            type_of_order,
            avg_time: format_number(s.mean, 2),
            std_time: format_opt(s.std, 2),
        })
        .collect()
}

pub fn time_by_city_and_traffic(data: &[CleanRecord]) -> Vec<CityTrafficTimeRow> {
    time_stats_by(data, |r| (r.city, r.road_traffic_density))
        .into_iter()
        .map(|((city, traffic), s)| CityTrafficTimeRow {
            city,
            traffic,
            avg_time: format_number(s.mean, 2),
            std_time: format_opt(s.std, 2),
        })
        .collect()
}

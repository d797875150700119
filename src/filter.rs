use crate::types::{CleanRecord, TrafficDensity};
use chrono::NaiveDate;

/// Narrowing applied after cleaning: orders strictly before `date_limit`
/// whose traffic level is in `traffic`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub date_limit: NaiveDate,
    pub traffic: Vec<TrafficDensity>,
}

impl FilterParams {
    pub fn keeps(&self, r: &CleanRecord) -> bool {
        r.order_date < self.date_limit && self.traffic.contains(&r.road_traffic_density)
    }
}

pub fn apply(data: &[CleanRecord], params: &FilterParams) -> Vec<CleanRecord> {
    data.iter().filter(|r| params.keeps(r)).cloned().collect()
}

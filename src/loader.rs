use crate::error::ReportError;
use crate::pipeline::{self, Cleaned};
use crate::types::{CleanRecord, RawRow, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
}

/// Fail on the first required column that the header does not name exactly.
pub fn validate_headers(headers: &StringRecord) -> Result<(), ReportError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::SchemaMismatch { column });
        }
    }
    Ok(())
}

/// Read the delimited table into raw rows. The header is checked before any
/// row is deserialized, so a schema problem never yields partial output.
pub fn read_raw_table<R: Read>(reader: R) -> Result<Vec<RawRow>, ReportError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    validate_headers(&headers)?;
    debug!(columns = headers.len(), "header validated");

    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

pub fn clean_from_reader<R: Read>(reader: R) -> Result<(Vec<CleanRecord>, LoadReport), ReportError> {
    let raw = read_raw_table(reader)?;
    let total_rows = raw.len();
    let Cleaned { records, dropped } = pipeline::clean(raw)?;
    let report = LoadReport {
        total_rows,
        kept_rows: records.len(),
        dropped_rows: dropped,
    };
    Ok((records, report))
}

pub fn load_and_clean<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<CleanRecord>, LoadReport), ReportError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading delivery table");
    let file = File::open(path)?;
    clean_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SENTINEL;
    use std::io::Write;

    const HEADER: &str = "ID,Delivery_person_ID,Delivery_person_Age,Delivery_person_Ratings,\
Restaurant_latitude,Restaurant_longitude,Delivery_location_latitude,Delivery_location_longitude,\
Order_Date,Time_Orderd,Time_Order_picked,Weatherconditions,Road_traffic_density,Vehicle_condition,\
Type_of_order,Type_of_vehicle,multiple_deliveries,Festival,City,Time_taken(min)";

    fn line(id: &str, age: &str, traffic: &str, time_taken: &str) -> String {
        format!(
            "{id} ,INDORES13DEL02,{age},4.9,22.745049,75.892471,22.765049,75.912471,\
19-03-2022,11:30:00,11:45:00,conditions Sunny,{traffic},2,Snack ,motorcycle ,0,No ,Urban ,{time_taken}"
        )
    }

    #[test]
    fn loads_and_cleans_a_small_export() {
        let csv = [
            HEADER.to_string(),
            line("0x4607", "37", "High ", "(min) 24"),
            line("0xb379", SENTINEL, "Jam ", "(min) 33"),
            line("0x5d6d", "23", SENTINEL, "(min) 26"),
            line("0x7a6a", "38", "Low ", "(min) 21"),
        ]
        .join("\n");
        let (records, report) = clean_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            report,
            LoadReport { total_rows: 4, kept_rows: 2, dropped_rows: 2 }
        );
        assert_eq!(records[0].id, "0x4607");
        assert_eq!(records[0].time_taken_min, 24);
        assert_eq!(records[1].id, "0x7a6a");
        assert_eq!(records[1].delivery_person_age, 38);
    }

    #[test]
    fn missing_column_is_schema_mismatch() {
        let header = HEADER.replace(",City,", ",Town,");
        let csv = format!("{}\n{}", header, line("0x1", "30", "Low ", "(min) 20"));
        let err = clean_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::SchemaMismatch { column: "City" }));
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let header = HEADER.replace("Festival", "festival");
        let err = read_raw_table(format!("{}\n", header).as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::SchemaMismatch { column: "Festival" }));
    }

    #[test]
    fn header_only_file_yields_empty_table() {
        let (records, report) = clean_from_reader(format!("{}\n", HEADER).as_bytes()).unwrap();
        assert!(records.is_empty());
        assert_eq!(report.total_rows, 0);
    }

    #[test]
    fn vehicle_condition_column_is_optional() {
        let header = HEADER.replace(",Vehicle_condition", "");
        let row = line("0x1", "30", "Low ", "(min) 20").replace(",Low ,2,", ",Low ,");
        let (records, _) = clean_from_reader(format!("{}\n{}", header, row).as_bytes()).unwrap();
        assert_eq!(records[0].vehicle_condition, None);
    }

    #[test]
    fn malformed_cell_reports_data_row() {
        let csv = [
            HEADER.to_string(),
            line("0x1", "30", "Low ", "(min) 20"),
            line("0x2", "31", "Low ", "20"),
        ]
        .join("\n");
        let err = clean_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MalformedValue { column: "Time_taken(min)", row: 2, .. }
        ));
    }

    #[test]
    fn load_and_clean_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "{}", line("0x1", "30", "Medium ", "(min) 20")).unwrap();
        let (records, report) = load_and_clean(file.path()).unwrap();
        assert_eq!(report.kept_rows, 1);
        assert_eq!(records[0].road_traffic_density.as_str(), "Medium");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_and_clean(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}

//! Record types for the GasTrack ingestion pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---

/// Fixed set of physical locations an analyzer reading can be taken from.
///
/// Six numbered sheets plus the digester inlet and outlet. The serde renames
/// carry the spaces used on the wire ("Sheet 1", not "Sheet1"); any other
/// string fails to decode, which is how out-of-enumeration sample points are
/// rejected at the payload boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplePoint {
    // ---
    #[serde(rename = "Sheet 1")]
    Sheet1,
    #[serde(rename = "Sheet 2")]
    Sheet2,
    #[serde(rename = "Sheet 3")]
    Sheet3,
    #[serde(rename = "Sheet 4")]
    Sheet4,
    #[serde(rename = "Sheet 5")]
    Sheet5,
    #[serde(rename = "Sheet 6")]
    Sheet6,
    Inlet,
    Outlet,
}

impl SamplePoint {
    /// Wire/storage spelling of this sample point.
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            SamplePoint::Sheet1 => "Sheet 1",
            SamplePoint::Sheet2 => "Sheet 2",
            SamplePoint::Sheet3 => "Sheet 3",
            SamplePoint::Sheet4 => "Sheet 4",
            SamplePoint::Sheet5 => "Sheet 5",
            SamplePoint::Sheet6 => "Sheet 6",
            SamplePoint::Inlet => "Inlet",
            SamplePoint::Outlet => "Outlet",
        }
    }
}

/// One timestamped gas-composition sample from the analyzer.
///
/// `timestamp` and `sample_point` are required; every measurement is optional
/// and `None` means "not measured", preserved as SQL NULL rather than coerced
/// to zero. A fresh v4 id is generated at decode time when the payload omits
/// one. Rows are append-only once stored.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerReading {
    // ---
    pub timestamp: NaiveDateTime,
    pub sample_point: SamplePoint,

    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub o2_pct: Option<f64>,
    pub co2_pct: Option<f64>,
    pub h2s_ppm: Option<f64>,
    pub ch4_pct: Option<f64>,
    pub net_cal_val_mj_m3: Option<f64>,
    pub gross_cal_val_mj_m3: Option<f64>,
    pub t_sensor_f: Option<f64>,
    pub balance_n2_pct: Option<f64>,

    // Audit fields for hand-corrected values
    #[serde(default)]
    pub is_manual_override: bool,
    pub override_note: Option<String>,
}

/// One calendar day's aggregate blower/flare flows, keyed by date.
///
/// Re-ingesting a date replaces the stored row in full; fields are never
/// merged across submissions.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyFlowInput {
    // ---
    pub date: NaiveDate,
    pub blower_1_scf_day: Option<f64>,
    pub blower_2a_scf_day: Option<f64>,
    pub blower_2b_scf_day: Option<f64>,
    pub blower_2c_scf_day: Option<f64>,
    pub biorem_ambient_air_scf_day: Option<f64>,
    pub biogas_flared_scf_day: Option<f64>,
}

/// Named constant for downstream emission/conversion calculations.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Factor {
    // ---
    pub key: String,
    pub value: f64,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn reading_decodes_with_generated_id() {
        // ---
        let json = r#"{"timestamp": "2025-09-01T00:00:00", "sample_point": "Inlet", "o2_pct": 1.5}"#;
        let a: AnalyzerReading = serde_json::from_str(json).unwrap();
        let b: AnalyzerReading = serde_json::from_str(json).unwrap();

        assert_eq!(a.sample_point, SamplePoint::Inlet);
        assert_eq!(a.o2_pct, Some(1.5));
        // Absent measurements stay absent, never zero
        assert_eq!(a.co2_pct, None);
        assert!(!a.is_manual_override);
        assert_eq!(a.override_note, None);
        // Each decode without an explicit id gets its own
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn reading_keeps_explicit_id() {
        // ---
        let json = r#"{
            "id": "8f7d2f8e-3e47-4b39-9d2a-6f3f0c2b1a00",
            "timestamp": "2025-09-01T06:30:00",
            "sample_point": "Sheet 3",
            "is_manual_override": true,
            "override_note": "re-keyed from paper log"
        }"#;
        let r: AnalyzerReading = serde_json::from_str(json).unwrap();

        assert_eq!(
            r.id,
            "8f7d2f8e-3e47-4b39-9d2a-6f3f0c2b1a00".parse::<Uuid>().unwrap()
        );
        assert_eq!(r.sample_point, SamplePoint::Sheet3);
        assert!(r.is_manual_override);
        assert_eq!(r.override_note.as_deref(), Some("re-keyed from paper log"));
    }

    #[test]
    fn reading_rejects_unknown_sample_point() {
        // ---
        let json = r#"{"timestamp": "2025-09-01T00:00:00", "sample_point": "Sheet 7"}"#;
        assert!(serde_json::from_str::<AnalyzerReading>(json).is_err());
    }

    #[test]
    fn reading_rejects_missing_timestamp() {
        // ---
        let json = r#"{"sample_point": "Outlet", "ch4_pct": 55.0}"#;
        assert!(serde_json::from_str::<AnalyzerReading>(json).is_err());
    }

    #[test]
    fn sample_point_round_trips_through_as_str() {
        // ---
        for sp in [
            SamplePoint::Sheet1,
            SamplePoint::Sheet6,
            SamplePoint::Inlet,
            SamplePoint::Outlet,
        ] {
            let decoded: SamplePoint =
                serde_json::from_str(&format!("\"{}\"", sp.as_str())).unwrap();
            assert_eq!(decoded, sp);
        }
    }

    #[test]
    fn flow_decodes_with_sparse_fields() {
        // ---
        let json = r#"{"date": "2025-09-01", "blower_1_scf_day": 100.0}"#;
        let f: DailyFlowInput = serde_json::from_str(json).unwrap();

        assert_eq!(f.date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(f.blower_1_scf_day, Some(100.0));
        assert_eq!(f.blower_2a_scf_day, None);
        assert_eq!(f.biogas_flared_scf_day, None);
    }

    #[test]
    fn flow_rejects_missing_date() {
        // ---
        let json = r#"{"blower_1_scf_day": 100.0}"#;
        assert!(serde_json::from_str::<DailyFlowInput>(json).is_err());
    }
}

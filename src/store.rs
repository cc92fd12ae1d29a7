//! Storage operations for the GasTrack backend.
//!
//! Every operation takes the shared [`SqlitePool`] and scopes its connection
//! to the call: the connection (or transaction) is acquired on entry and
//! released unconditionally on exit, success or failure. Batch ingestion is
//! all-or-nothing — a failed statement drops the transaction, which rolls the
//! whole batch back.

use sqlx::SqlitePool;
use tracing::debug;

use crate::{AnalyzerReading, DailyFlowInput, Factor};

// ---

/// Append a batch of analyzer readings in a single transaction.
///
/// Readings are append-only: each row is inserted under its (decode-time
/// generated) id and is never updated afterwards, so the historical audit
/// trail, manual overrides included, cannot silently disappear. An empty
/// batch returns 0 without touching storage.
///
/// Returns the number of rows written.
pub async fn ingest_analyzer_readings(
    pool: &SqlitePool,
    readings: &[AnalyzerReading],
) -> Result<u64, sqlx::Error> {
    // ---
    if readings.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for r in readings {
        let result = sqlx::query(
            r#"
            INSERT INTO ts_analyzer_reading (
                id, timestamp, sample_point, o2_pct, co2_pct, h2s_ppm, ch4_pct,
                net_cal_val_mj_m3, gross_cal_val_mj_m3, t_sensor_f, balance_n2_pct,
                is_manual_override, override_note
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(r.id)
        .bind(r.timestamp)
        .bind(r.sample_point.as_str())
        .bind(r.o2_pct)
        .bind(r.co2_pct)
        .bind(r.h2s_ppm)
        .bind(r.ch4_pct)
        .bind(r.net_cal_val_mj_m3)
        .bind(r.gross_cal_val_mj_m3)
        .bind(r.t_sensor_f)
        .bind(r.balance_n2_pct)
        .bind(r.is_manual_override)
        .bind(r.override_note.as_deref())
        .execute(&mut *tx)
        .await?;

        written += result.rows_affected();
    }

    tx.commit().await?;
    debug!("Ingested {} analyzer readings", written);
    Ok(written)
}

/// Replace a batch of daily flow inputs in a single transaction.
///
/// A day's log may be corrected and re-submitted wholesale, so a conflicting
/// date overwrites the stored row in full — every column is listed in the
/// upsert, which makes re-ingesting the same payload idempotent and rules out
/// per-field merges. An empty batch returns 0 without touching storage.
///
/// Returns the number of rows affected.
pub async fn ingest_daily_flow_inputs(
    pool: &SqlitePool,
    flows: &[DailyFlowInput],
) -> Result<u64, sqlx::Error> {
    // ---
    if flows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for f in flows {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_flow_input (
                date, blower_1_scf_day, blower_2a_scf_day, blower_2b_scf_day,
                blower_2c_scf_day, biorem_ambient_air_scf_day, biogas_flared_scf_day
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (date) DO UPDATE SET
                blower_1_scf_day = excluded.blower_1_scf_day,
                blower_2a_scf_day = excluded.blower_2a_scf_day,
                blower_2b_scf_day = excluded.blower_2b_scf_day,
                blower_2c_scf_day = excluded.blower_2c_scf_day,
                biorem_ambient_air_scf_day = excluded.biorem_ambient_air_scf_day,
                biogas_flared_scf_day = excluded.biogas_flared_scf_day
            "#,
        )
        .bind(f.date)
        .bind(f.blower_1_scf_day)
        .bind(f.blower_2a_scf_day)
        .bind(f.blower_2b_scf_day)
        .bind(f.blower_2c_scf_day)
        .bind(f.biorem_ambient_air_scf_day)
        .bind(f.biogas_flared_scf_day)
        .execute(&mut *tx)
        .await?;

        written += result.rows_affected();
    }

    tx.commit().await?;
    debug!("Ingested {} daily flow inputs (replace)", written);
    Ok(written)
}

/// Fetch every stored emission/conversion factor, in no particular order.
pub async fn get_all_factors(pool: &SqlitePool) -> Result<Vec<Factor>, sqlx::Error> {
    // ---
    sqlx::query_as::<_, Factor>("SELECT key, value, description FROM factors")
        .fetch_all(pool)
        .await
}

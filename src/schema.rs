//! Database schema management for the GasTrack backend.
//!
//! Ensures the three tables and the baseline factor rows exist before serving
//! requests. Applied once on startup from `main.rs` (EMBP: single gateway
//! call); there is no auto-initialization side effect anywhere else.

use anyhow::Result;
use sqlx::SqlitePool;

// ---

/// Baseline emission/conversion factors seeded at initialization.
///
/// Downstream emission calculations expect at least these keys to exist.
/// Seeding uses `INSERT OR IGNORE`, so re-running initialization never
/// duplicates or overwrites a row that is already present.
const SEED_FACTORS: &[(&str, f64, &str)] = &[
    ("EMF_NOX_LBS_MMBTU", 0.098, "NOx emission factor, lbs per MMBtu"),
    ("EMF_CO_LBS_MMBTU", 0.082, "CO emission factor, lbs per MMBtu"),
    ("EMF_SO2_LBS_MMBTU", 0.0006, "SO2 emission factor, lbs per MMBtu"),
    ("EMF_PM_LBS_MMBTU", 0.0075, "Particulate emission factor, lbs per MMBtu"),
    ("CF_BTU_PER_MJ", 947.817, "Conversion factor, Btu per MJ"),
];

/// Create the database schema and seed the baseline factors (idempotent).
///
/// Creates `ts_analyzer_reading` for the irregular time-series samples,
/// `daily_flow_input` for per-day aggregates, and `factors` for named
/// constants. Safe to call on every startup; no-op if objects already exist.
/// The three tables are independent collections with no foreign keys —
/// downstream consumers correlate them by timestamp/date at query time.
///
/// Errors are propagated if any SQL execution fails; a partially applied
/// schema is never committed.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Table 1: raw time-series analyzer readings, append-only by generated id
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ts_analyzer_reading (
            id                  BLOB PRIMARY KEY,
            timestamp           TEXT NOT NULL,
            sample_point        TEXT NOT NULL,
            o2_pct              REAL,
            co2_pct             REAL,
            h2s_ppm             REAL,
            ch4_pct             REAL,
            net_cal_val_mj_m3   REAL,
            gross_cal_val_mj_m3 REAL,
            t_sensor_f          REAL,
            balance_n2_pct      REAL,
            is_manual_override  INTEGER NOT NULL DEFAULT 0,
            override_note       TEXT
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Table 2: one row per calendar day of blower/flare flows, replaced whole
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_flow_input (
            date                       TEXT PRIMARY KEY,
            blower_1_scf_day           REAL,
            blower_2a_scf_day          REAL,
            blower_2b_scf_day          REAL,
            blower_2c_scf_day          REAL,
            biorem_ambient_air_scf_day REAL,
            biogas_flared_scf_day      REAL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Table 3: named emission/conversion constants
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS factors (
            key         TEXT PRIMARY KEY,
            value       REAL NOT NULL,
            description TEXT
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Basic indexes for the query-time correlation done by downstream consumers
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_ts_analyzer_reading_timestamp
            ON ts_analyzer_reading (timestamp);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_ts_analyzer_reading_sample_point
            ON ts_analyzer_reading (sample_point);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    for &(key, value, description) in SEED_FACTORS {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO factors (key, value, description)
            VALUES (?1, ?2, ?3);
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // ---
        // A single never-reaped connection keeps the :memory: database alive
        // for the whole test.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_schema_is_idempotent() {
        // ---
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();

        // Seed rows are not duplicated by the second run
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM factors")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, SEED_FACTORS.len() as i64);
    }

    #[tokio::test]
    async fn seeding_preserves_adjusted_values() {
        // ---
        let pool = memory_pool().await;
        create_schema(&pool).await.unwrap();

        // Administrative adjustment outside the ingestion API
        sqlx::query("UPDATE factors SET value = 0.2 WHERE key = 'EMF_NOX_LBS_MMBTU'")
            .execute(&pool)
            .await
            .unwrap();

        create_schema(&pool).await.unwrap();

        let (value,): (f64,) =
            sqlx::query_as("SELECT value FROM factors WHERE key = 'EMF_NOX_LBS_MMBTU'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(value, 0.2);
    }
}

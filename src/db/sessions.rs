use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::sensor::Reading;
use crate::models::session::{NewSession, SessionReadingRecord, SessionRecord};

/// Sessions shown in the overview
pub const RECENT_SESSIONS_LIMIT: i64 = 5;

// Keeps a single INSERT well below the Postgres bind parameter limit
const READING_INSERT_CHUNK: usize = 1000;

/// Store a finished session and all of its raw readings.
/// Both writes share one transaction; a failure leaves nothing behind.
#[tracing::instrument(
    name = "Insert session with readings",
    skip(pool, session, readings),
    fields(
        reading_count = readings.len(),
        risk_level = %session.risk_level
    )
)]
pub async fn insert_session_with_readings(
    pool: &PgPool,
    session: &NewSession,
    readings: &[Reading],
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let session_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO sessions (
            start_time, end_time, duration_seconds, avg_heart_rate,
            avg_wrist_angle, accuracy_score, risk_level, ai_conclusion, exercise_tip
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.duration_seconds)
    .bind(session.avg_heart_rate)
    .bind(session.avg_wrist_angle)
    .bind(session.accuracy_score)
    .bind(&session.risk_level)
    .bind(&session.ai_conclusion)
    .bind(&session.exercise_tip)
    .fetch_one(&mut *tx)
    .await?;

    for chunk in readings.chunks(READING_INSERT_CHUNK) {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO sensor_readings (session_id, timestamp, wrist_angle, heart_rate) ",
        );
        query_builder.push_values(chunk, |mut row, reading| {
            row.push_bind(session_id)
                .push_bind(reading.timestamp)
                .push_bind(reading.wrist_angle)
                .push_bind(reading.heart_rate);
        });
        query_builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!("Saved session {} with {} readings", session_id, readings.len());
    Ok(session_id)
}

#[tracing::instrument(name = "Get recent sessions", skip(pool))]
pub async fn get_recent_sessions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<SessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT id, start_time, end_time, duration_seconds, avg_heart_rate,
               avg_wrist_angle, accuracy_score, risk_level, ai_conclusion, exercise_tip
        FROM sessions
        ORDER BY start_time DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_session_by_id(
    pool: &PgPool,
    session_id: i64,
) -> Result<Option<SessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SessionRecord>(
        r#"
        SELECT id, start_time, end_time, duration_seconds, avg_heart_rate,
               avg_wrist_angle, accuracy_score, risk_level, ai_conclusion, exercise_tip
        FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_session_readings(
    pool: &PgPool,
    session_id: i64,
) -> Result<Vec<SessionReadingRecord>, sqlx::Error> {
    sqlx::query_as::<_, SessionReadingRecord>(
        r#"
        SELECT id, session_id, timestamp, wrist_angle, heart_rate
        FROM sensor_readings
        WHERE session_id = $1
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
}

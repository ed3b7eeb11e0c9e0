use crate::errors::AppError;
use crate::ledger::{add_relax, add_work, snapshot};
use crate::models::{BalanceResponse, StateSnapshot, TargetResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{body::Bytes, extract::State, response::Html, Json};
use serde_json::Value;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = state.today();
    let data = state.settled(today).await?;
    Ok(Html(render_index(&snapshot(&data, today))))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateSnapshot>, AppError> {
    let today = state.today();
    let data = state.settled(today).await?;
    Ok(Json(snapshot(&data, today)))
}

pub async fn work(State(state): State<AppState>, body: Bytes) -> Result<Json<BalanceResponse>, AppError> {
    let minutes = minutes_from_body(&body)?;
    let today = state.today();
    let balance = state.update(today, |data| add_work(data, minutes)).await?;
    info!(minutes, balance, "logged work");
    Ok(Json(BalanceResponse { ok: true, balance }))
}

pub async fn relax(State(state): State<AppState>, body: Bytes) -> Result<Json<BalanceResponse>, AppError> {
    let minutes = minutes_from_body(&body)?;
    let today = state.today();
    let balance = state.update(today, |data| add_relax(data, minutes)).await?;
    info!(minutes, balance, "logged relax");
    Ok(Json(BalanceResponse { ok: true, balance }))
}

pub async fn get_target(State(state): State<AppState>) -> Result<Json<TargetResponse>, AppError> {
    let data = state.settled(state.today()).await?;
    Ok(Json(TargetResponse {
        ok: None,
        target: data.target,
    }))
}

pub async fn set_target(State(state): State<AppState>, body: Bytes) -> Result<Json<TargetResponse>, AppError> {
    let target = target_from_body(&body)?;
    state
        .update(state.today(), |data| data.target = target)
        .await?;
    info!(target, "updated daily target");
    Ok(Json(TargetResponse {
        ok: Some(true),
        target,
    }))
}

fn minutes_from_body(body: &[u8]) -> Result<i64, AppError> {
    let invalid = || AppError::bad_request("Invalid minutes");
    let payload: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    match payload.get("minutes") {
        None if payload.is_object() => Ok(0),
        Some(value) => coerce_int(value).ok_or_else(invalid),
        None => Err(invalid()),
    }
}

fn target_from_body(body: &[u8]) -> Result<i64, AppError> {
    let invalid = || AppError::bad_request("Invalid target");
    let payload: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    let target = payload.get("target").and_then(coerce_int).ok_or_else(invalid)?;
    if target <= 0 {
        return Err(AppError::bad_request("Target must be > 0"));
    }
    Ok(target)
}

/// Integers pass through, floats truncate toward zero, and numeric strings are parsed.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

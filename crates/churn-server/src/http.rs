//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;

use churn_core::{Figure, PageLayout, PanelId, PanelParams, UiEvent};
use churn_stats::{churn_counts, TableSummary};

use crate::error::reject;
use crate::page;
use crate::AppState;

/// Render the dashboard page with the current figures embedded
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(page::render(
        &controller,
        &state.config.charts.plotly_cdn,
        state.debug,
    ))
}

/// Page layout: panels, dropdown options and selection
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<PageLayout> {
    let controller = state.controller.lock().await;
    Json(controller.layout())
}

/// A panel's figure plus the parameters it was built from
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    pub id: PanelId,
    pub params: PanelParams,
    pub figure: Figure,
}

/// Get a panel's current figure
pub async fn get_panel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PanelResponse>, (StatusCode, String)> {
    let panel: PanelId = id.parse().map_err(reject)?;
    let controller = state.controller.lock().await;

    controller
        .state(panel)
        .map(|s| {
            Json(PanelResponse {
                id: panel,
                params: s.params.clone(),
                figure: s.figure.clone(),
            })
        })
        .ok_or((StatusCode::NOT_FOUND, format!("Unknown panel: {}", id)))
}

/// Deliver a UI event to a panel and return the recomputed figure
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(event): Json<UiEvent>,
) -> Result<Json<Figure>, (StatusCode, String)> {
    let panel: PanelId = id.parse().map_err(reject)?;
    let mut controller = state.controller.lock().await;

    let figure = controller.dispatch(panel, &event).map_err(reject)?;
    Ok(Json(figure.clone()))
}

/// Count of customers with one churn label
#[derive(Debug, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Dataset overview
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub source: Option<String>,
    pub categorical_columns: Vec<String>,
    pub churn: Vec<LabelCount>,
    pub missing_total_charges: usize,
    pub summary: TableSummary,
}

/// Describe the loaded dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<DatasetResponse> {
    let table = &state.table;
    Json(DatasetResponse {
        source: table.source().map(String::from),
        categorical_columns: table.categorical_columns().to_vec(),
        churn: churn_counts(table)
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.as_str().to_string(),
                count,
            })
            .collect(),
        missing_total_charges: table.missing_total_charges(),
        summary: TableSummary::from_table(table),
    })
}

/// Liveness check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "customers": state.table.len(),
    }))
}

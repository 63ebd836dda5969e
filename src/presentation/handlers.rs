// HTTP request handlers
use crate::domain::filter::FilterSelection;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::Response,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Comma-separated filter values. An absent parameter selects every value;
/// a present but empty one selects nothing. Repeating a parameter
/// (`?years=2014&years=2015`) is rejected as an invalid filter.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub years: Option<String>,
    pub regions: Option<String>,
    pub categories: Option<String>,
}

impl DashboardQuery {
    pub fn into_selection(self, defaults: FilterSelection) -> Result<FilterSelection, ApiError> {
        let years = match self.years {
            Some(raw) => split_values(&raw)
                .map(|v| {
                    v.parse::<i32>()
                        .map_err(|_| ApiError::InvalidFilter(format!("'{}' is not a year", v)))
                })
                .collect::<Result<BTreeSet<_>, _>>()?,
            None => defaults.years,
        };
        let regions = match self.regions {
            Some(raw) => split_values(&raw).map(str::to_string).collect(),
            None => defaults.regions,
        };
        let categories = match self.categories {
            Some(raw) => split_values(&raw).map(str::to_string).collect(),
            None => defaults.categories,
        };

        Ok(FilterSelection {
            years,
            regions,
            categories,
        })
    }
}

fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|v| !v.is_empty())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Values offered by the year, region and category controls
pub async fn filter_options(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let options = state.dashboard_service.filter_options();
    json_response(&options, accepts_brotli(&headers)).await
}

/// Recompute the dashboard for the requested filter state
pub async fn dashboard(
    query: Result<Query<DashboardQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidFilter(rejection.body_text()))?;
    let service = &state.dashboard_service;
    let selection = query.into_selection(service.default_selection())?;
    let dashboard = service.recompute(&selection);
    json_response(&dashboard, accepts_brotli(&headers)).await
}

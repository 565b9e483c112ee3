use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::compressor::PageCompression;
use crate::layout::target::TargetBand;
use crate::layout::{
    BoxModelEngine, FontFamily, MemorySurface, Orchestrator, PaginationOutcome, TagSets,
};
use crate::models::Node;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    #[serde(default)]
    pub document: Option<Node>,
    /// Theme line height; overrides `BASE_LINE_HEIGHT` for this request.
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub font: Option<FontFamily>,
    /// Custom classification sets for documents rendered with other class names.
    #[serde(default)]
    pub tags: Option<TagSets>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub index: usize,
    pub height: f64,
    pub leftover: f64,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateResponse {
    pub total_pages: usize,
    pub buffer: Option<f64>,
    pub score: Option<f64>,
    pub band: Option<TargetBand>,
    pub pages: Vec<PageView>,
    pub compression: Vec<PageCompression>,
}

impl PaginateResponse {
    fn empty() -> PaginateResponse {
        PaginateResponse {
            total_pages: 0,
            buffer: None,
            score: None,
            band: None,
            pages: Vec::new(),
            compression: Vec::new(),
        }
    }
}

/// POST /api/v1/paginate
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<PaginateRequest>,
) -> Result<Json<PaginateResponse>, AppError> {
    let mut config = state.config.pagination.clone();
    if let Some(line_height) = req.line_height {
        if !line_height.is_finite() || line_height <= 0.0 {
            return Err(AppError::Validation(format!(
                "lineHeight must be a positive number, got {line_height}"
            )));
        }
        config.base_line_height = line_height;
    }
    if let Some(font) = req.font {
        config.font = font;
    }
    if let Some(tags) = req.tags {
        config.tags = tags;
    }

    let document = req.document.map(|mut root| {
        root.propagate_text_style();
        root
    });

    let engine = Arc::new(BoxModelEngine::new(&config));
    let surface = Arc::new(MemorySurface::new());
    let orchestrator = Orchestrator::new(engine, surface.clone(), config);

    let report = match orchestrator.paginate(document).await? {
        PaginationOutcome::Published(report) => report,
        PaginationOutcome::Empty => return Ok(Json(PaginateResponse::empty())),
        PaginationOutcome::Superseded => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "pagination run superseded on a request-scoped orchestrator"
            )))
        }
    };

    let mut published = surface.snapshot().into_iter();
    let pages = report
        .pages
        .into_iter()
        .map(|summary| PageView {
            index: summary.index,
            height: summary.height,
            leftover: summary.leftover,
            nodes: published.next().unwrap_or_default(),
        })
        .collect();

    info!(
        total_pages = report.total_pages,
        buffer = report.buffer,
        "Paginate request completed"
    );

    Ok(Json(PaginateResponse {
        total_pages: report.total_pages,
        buffer: Some(report.buffer),
        score: report.score.is_finite().then_some(report.score),
        band: Some(report.band),
        pages,
        compression: report.compression,
    }))
}

//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DashboardError;
use crate::domain::session::Page;

use super::templates::{nav_links, BasePage, ErrorTemplate, SidebarTemplate};

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::DataUnavailable { .. } | DashboardError::SchemaError { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        DashboardError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        DashboardError::UnknownColumn { .. }
        | DashboardError::ConfigParse { .. }
        | DashboardError::ConfigMissing { .. }
        | DashboardError::ConfigInvalid { .. }
        | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DashboardError> for WebError {
    fn from(err: DashboardError) -> Self {
        let status = status_from_error(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %err, "rejected request");
        }
        Self::new(status, err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        tracing::error!(error = %err, "template render failed");
        Self::internal(format!("template error: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let content = match (ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        })
        .render()
        {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };

        // Full page with navigation so the other pages stay reachable.
        let mut nav = nav_links(Page::Overview);
        nav.iter_mut().for_each(|l| l.active = false);
        let sidebar = match (SidebarTemplate {
            nav: &nav,
            tabs: &[],
            oob: false,
        })
        .render()
        {
            Ok(html) => html,
            Err(_) => return (self.status, Html(content)).into_response(),
        };
        let page = BasePage {
            title: "Error",
            sidebar: &sidebar,
            content: &content,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, content).into_response(),
        }
    }
}

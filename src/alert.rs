//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element defined in [crate::html::base].

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error message with details on how to fix the problem.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div
                role="alert"
                class=(container_style)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            span class="mt-1 block text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-lg leading-none"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const ERROR_STYLE: &str = "p-4 mb-4 rounded-lg border border-red-300 \
    bg-red-50 text-red-800 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_fragment};

    use super::Alert;

    #[tokio::test]
    async fn error_alert_shows_message_and_details() {
        let response = Alert::Error {
            message: "Could not delete transaction".to_owned(),
            details: "The transaction could not be found.".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let message = html
            .select(&Selector::parse("[role=alert] p").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Could not delete transaction");

        let details = html
            .select(&Selector::parse("[role=alert] span").unwrap())
            .next()
            .expect("No alert details found")
            .text()
            .collect::<String>();
        assert_eq!(details.trim(), "The transaction could not be found.");
    }

    #[tokio::test]
    async fn empty_details_are_omitted() {
        let response = Alert::Error {
            message: "Something went wrong".to_owned(),
            details: String::new(),
        }
        .into_response();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("[role=alert] span").unwrap())
                .next()
                .is_none()
        );
    }
}

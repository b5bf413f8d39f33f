//! The public home page that introduces FinanceFlow.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    auth::get_token_from_cookies,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, LINK_STYLE, base},
};

struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Everything in one place",
        description: "Record your income and expenses in seconds from a single page.",
    },
    Feature {
        title: "Charts that explain",
        description: "See where your money goes by category and how each month compares.",
    },
    Feature {
        title: "Private by default",
        description: "Your transactions are only ever visible to you.",
    },
    Feature {
        title: "Find anything",
        description: "Filter your transactions by month or type and page through your history.",
    },
];

const BENEFITS: [&str; 3] = [
    "Free sign up, no card required",
    "Works on any device with a browser",
    "Totals and charts update as you go",
];

/// A route handler for the landing page.
///
/// Visitors who are already signed in are pointed at their dashboard instead
/// of the sign up and sign in pages.
pub async fn get_landing_page(jar: PrivateCookieJar) -> Response {
    let is_signed_in = get_token_from_cookies(&jar).is_ok();

    landing_view(is_signed_in).into_response()
}

fn landing_view(is_signed_in: bool) -> Markup {
    let (primary_url, primary_text, secondary_url, secondary_text) = if is_signed_in {
        (
            endpoints::DASHBOARD_VIEW,
            "Go to your dashboard",
            endpoints::LOG_OUT,
            "Sign out",
        )
    } else {
        (
            endpoints::REGISTER_VIEW,
            "Get started for free",
            endpoints::LOG_IN_VIEW,
            "I already have an account",
        )
    };

    let content = html! {
        header class="border-b border-gray-200 dark:border-gray-700"
        {
            div class="max-w-screen-xl flex items-center justify-between mx-auto p-4"
            {
                a href=(endpoints::ROOT) class="text-2xl font-semibold text-gray-900 dark:text-white"
                {
                    "FinanceFlow"
                }

                nav class="flex items-center gap-x-4"
                {
                    @if is_signed_in {
                        a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Dashboard" }
                    } @else {
                        a href=(endpoints::LOG_IN_VIEW) class=(LINK_STYLE) { "Sign in" }
                        a href=(endpoints::REGISTER_VIEW) class=(LINK_STYLE) { "Sign up" }
                    }
                }
            }
        }

        main class="text-gray-900 dark:text-white"
        {
            section id="hero" class="max-w-screen-md mx-auto px-6 py-16 text-center space-y-6"
            {
                p class="text-sm font-medium text-blue-600 dark:text-blue-400"
                {
                    "Personal finance made simple"
                }

                h1 class="text-4xl md:text-5xl font-bold" { "Take control of your money" }

                p class="text-lg text-gray-600 dark:text-gray-400"
                {
                    "Record your income and expenses, explore clear charts and make
                    better decisions about your money."
                }

                div class="flex flex-col sm:flex-row justify-center gap-4"
                {
                    a href=(primary_url) class={ "sm:w-auto " (BUTTON_PRIMARY_STYLE) } data-cta="primary"
                    {
                        (primary_text)
                    }

                    a href=(secondary_url) class=(LINK_STYLE) data-cta="secondary"
                    {
                        (secondary_text)
                    }
                }

                ul class="flex flex-col sm:flex-row justify-center gap-4 text-sm text-gray-600 dark:text-gray-400"
                {
                    @for benefit in BENEFITS {
                        li { (benefit) }
                    }
                }
            }

            section id="features" class="max-w-screen-xl mx-auto px-6 pb-16"
            {
                h2 class="text-2xl font-bold text-center mb-8"
                {
                    "Everything you need to manage your finances"
                }

                div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4"
                {
                    @for feature in &FEATURES {
                        div class=(CARD_STYLE) data-feature
                        {
                            h3 class="text-lg font-semibold mb-2" { (feature.title) }
                            p class="text-gray-600 dark:text-gray-400" { (feature.description) }
                        }
                    }
                }
            }
        }

        footer class="border-t border-gray-200 dark:border-gray-700 py-6 text-center text-sm text-gray-500"
        {
            "FinanceFlow"
        }
    };

    base("Home", &[], &content)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use scraper::{Html, Selector};
    use time::Duration;

    use crate::{
        auth::{UserID, set_auth_cookie},
        endpoints,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::get_landing_page;

    fn cta_href(html: &Html, which: &str) -> String {
        html.select(&Selector::parse(&format!("a[data-cta={which}]")).unwrap())
            .next()
            .and_then(|link| link.value().attr("href"))
            .unwrap_or_else(|| panic!("Could not find {which} call to action"))
            .to_owned()
    }

    #[tokio::test]
    async fn visitors_are_pointed_at_sign_up_and_sign_in() {
        let jar = PrivateCookieJar::new(Key::generate());

        let response = get_landing_page(jar).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(cta_href(&html, "primary"), endpoints::REGISTER_VIEW);
        assert_eq!(cta_href(&html, "secondary"), endpoints::LOG_IN_VIEW);
        let features = html
            .select(&Selector::parse("[data-feature]").unwrap())
            .count();
        assert_eq!(features, 4);
    }

    #[tokio::test]
    async fn signed_in_users_are_pointed_at_dashboard() {
        let jar = set_auth_cookie(
            PrivateCookieJar::new(Key::generate()),
            UserID::new(1),
            Duration::minutes(5),
        )
        .unwrap();

        let response = get_landing_page(jar).await;

        let html = parse_html_document(response).await;
        assert_eq!(cta_href(&html, "primary"), endpoints::DASHBOARD_VIEW);
    }
}

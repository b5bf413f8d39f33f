//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{auth::Email, endpoints};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm sm:bg-transparent
        sm:text-blue-700 sm:p-0 dark:text-white sm:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        sm:hover:bg-transparent sm:border-0 sm:hover:text-blue-700 sm:p-0
        dark:text-white sm:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white sm:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            { (self.title) }
        )
    }
}

/// The header shown on pages for signed-in users.
pub struct NavBar<'a> {
    email: &'a Email,
    links: Vec<Link<'a>>,
}

impl<'a> NavBar<'a> {
    /// Get the navigation bar for the user signed in with `email`.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str, email: &'a Email) -> NavBar<'a> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            Link {
                url: endpoints::LOG_OUT,
                title: "Sign out",
                is_current: false,
            },
        ];

        NavBar { email, links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between gap-y-2 mx-auto p-4"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "FinanceFlow"
                    }

                    div class="flex items-center gap-x-6"
                    {
                        span
                            class="hidden sm:inline text-sm text-gray-600 dark:text-gray-300"
                            data-testid="current-user"
                        {
                            (self.email.as_str())
                        }

                        ul class="font-medium flex flex-row gap-x-4"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

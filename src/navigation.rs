//! The navigation bar shown on pages behind the auth wall.

use maud::{Markup, html};

use crate::endpoints;

const ACTIVE_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm
    lg:bg-transparent lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500";

const INACTIVE_LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm
    hover:bg-gray-100 lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700
    lg:p-0 dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
    dark:hover:text-white lg:dark:hover:bg-transparent";

/// Links shown in the bar, in order. The log-out link is never highlighted
/// since it immediately navigates away.
const LINKS: [(&str, &str); 3] = [
    (endpoints::PAYMENTS_VIEW, "Payments"),
    (endpoints::BANK_DETAILS_VIEW, "Bank details"),
    (endpoints::LOG_OUT, "Log out"),
];

/// The top navigation bar, with the link matching `active_endpoint`
/// highlighted.
pub struct NavBar<'a> {
    active_endpoint: &'a str,
}

impl<'a> NavBar<'a> {
    pub fn new(active_endpoint: &'a str) -> Self {
        NavBar { active_endpoint }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900" {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4" {
                    a href=(endpoints::ROOT) class="flex items-center space-x-3 rtl:space-x-reverse" {
                        span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white" {
                            "Rently"
                        }
                    }

                    div class="w-full lg:block lg:w-auto" {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for (url, title) in LINKS {
                                @let style = if url == self.active_endpoint
                                    && url != endpoints::LOG_OUT
                                {
                                    ACTIVE_LINK_STYLE
                                } else {
                                    INACTIVE_LINK_STYLE
                                };

                                li { a href=(url) class=(style) { (title) } }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn highlights_only_the_active_link() {
        for (active, title) in [
            (endpoints::PAYMENTS_VIEW, "Payments"),
            (endpoints::BANK_DETAILS_VIEW, "Bank details"),
        ] {
            let html = Html::parse_fragment(&NavBar::new(active).into_html().into_string());
            let selector = Selector::parse("a").unwrap();

            for link in html.select(&selector) {
                let href = link.attr("href").unwrap_or_default();
                let is_highlighted = link
                    .attr("class")
                    .unwrap_or_default()
                    .contains("bg-blue-700");

                assert_eq!(
                    is_highlighted,
                    href == active,
                    "on {active}, link {href} highlighted={is_highlighted}"
                );
            }

            assert!(
                html.root_element().html().contains(title),
                "nav should contain link text {title}"
            );
        }
    }

    #[test]
    fn log_out_link_is_never_highlighted() {
        let html = Html::parse_fragment(
            &NavBar::new(endpoints::LOG_OUT)
                .into_html()
                .into_string(),
        );
        let selector = Selector::parse("a").unwrap();

        for link in html.select(&selector) {
            assert!(
                !link.attr("class").unwrap_or_default().contains("bg-blue-700"),
                "link {} should not be highlighted",
                link.attr("href").unwrap_or_default()
            );
        }
    }
}

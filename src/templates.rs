use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::models::Film;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const PRIMARY_BUTTON: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const DANGER_BUTTON: &str = "text-sm text-red-600 hover:text-red-800";

/// `complete` is false when the full load has not been applied yet, so the
/// rows shown are only the films changed through this front end.
pub fn list_page(films: &[Film], complete: bool) -> String {
    page(
        "Films",
        html! {
            div class="flex items-start justify-between gap-6" {
                h1 class="text-3xl font-bold text-gray-900" { "Films List" }
                form method="post" action="/reload" {
                    button class="text-sm text-blue-600 hover:text-blue-800" type="submit" { "Reload" }
                }
            }

            @if !complete {
                div class="mt-6 rounded-md bg-yellow-50 p-4 text-sm text-yellow-800" {
                    "The list could not be fully loaded and may be incomplete. Use Reload to try again."
                }
            }

            @if films.is_empty() {
                div class="mt-10 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No films." }
                }
            } @else {
                table class="mt-8 w-full bg-white shadow rounded-lg text-left" {
                    thead class="border-b text-sm text-gray-500" {
                        tr {
                            th class="px-4 py-3" { "Title" }
                            th class="px-4 py-3" { "Director" }
                            th class="px-4 py-3" { "Release Date" }
                            th class="px-4 py-3" { "Action" }
                        }
                    }
                    tbody {
                        @for film in films {
                            (film_row(film))
                        }
                    }
                }
            }
        },
    )
}

pub fn detail_page(id: &str, film: &Film) -> String {
    page(
        &film.title,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-3xl font-bold text-gray-900" { (film.title) }
                dl class="mt-6 space-y-3 text-gray-700" {
                    div { dt class="inline font-medium" { "Director: " } dd class="inline" { (film.director) } }
                    div { dt class="inline font-medium" { "Release Date: " } dd class="inline" { (film.release_date) } }
                    div {
                        dt class="font-medium" { "Opening Crawl:" }
                        dd class="mt-2 whitespace-pre-line" { (film.opening_crawl) }
                    }
                }
                div class="mt-8 flex items-center gap-6" {
                    a class="text-blue-600 hover:text-blue-800" href=(edit_href(id)) { "Edit" }
                    (delete_button(id))
                }
            }
        },
    )
}

pub fn create_page() -> String {
    page(
        "Create Film",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Create Film" }
                (film_form("/create", None, "Create"))
            }
        },
    )
}

pub fn edit_page(id: &str, film: &Film) -> String {
    page(
        "Edit Film",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Edit Film" }
                (film_form(&edit_href(id), Some(film), "Update"))
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    page(
        "Error",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }
        },
    )
}

pub fn detail_href(id: &str) -> String {
    format!("/films/{}", urlencoding::encode(id))
}

pub fn edit_href(id: &str) -> String {
    format!("/edit/{}", urlencoding::encode(id))
}

fn delete_href(id: &str) -> String {
    format!("/films/{}/delete", urlencoding::encode(id))
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                nav class="bg-white shadow" {
                    ul class="max-w-4xl mx-auto px-6 py-4 flex gap-6 text-sm font-medium" {
                        li { a class="text-gray-700 hover:text-gray-900" href="/" { "Home" } }
                        li { a class="text-gray-700 hover:text-gray-900" href="/create" { "Create Film" } }
                    }
                }
                main class="max-w-4xl mx-auto px-6 py-10" { (body) }
            }
        }
    }
    .into_string()
}

fn film_row(film: &Film) -> Markup {
    html! {
        tr class="border-b last:border-0" {
            @if let Some(id) = film.id() {
                td class="px-4 py-3" {
                    a class="text-blue-600 hover:text-blue-800" href=(detail_href(&id)) { (film.title) }
                }
                td class="px-4 py-3 text-gray-700" { (film.director) }
                td class="px-4 py-3 text-gray-700" { (film.release_date) }
                td class="px-4 py-3" {
                    div class="flex items-center gap-3" {
                        a class="text-sm text-blue-600 hover:text-blue-800" href=(edit_href(&id)) { "Edit" }
                        span class="text-gray-300" { "|" }
                        (delete_button(&id))
                    }
                }
            } @else {
                td class="px-4 py-3" { (film.title) }
                td class="px-4 py-3 text-gray-700" { (film.director) }
                td class="px-4 py-3 text-gray-700" { (film.release_date) }
                td class="px-4 py-3" {}
            }
        }
    }
}

fn delete_button(id: &str) -> Markup {
    html! {
        form method="post" action=(delete_href(id)) {
            button class=(DANGER_BUTTON) type="submit" { "Delete" }
        }
    }
}

fn film_form(action: &str, film: Option<&Film>, submit: &str) -> Markup {
    let title = film.map(|f| f.title.as_str()).unwrap_or_default();
    let director = film.map(|f| f.director.as_str()).unwrap_or_default();
    let release_date = film.map(|f| f.release_date.as_str()).unwrap_or_default();
    let opening_crawl = film.map(|f| f.opening_crawl.as_str()).unwrap_or_default();

    html! {
        form class="mt-8 space-y-6" method="post" action=(action) {
            div {
                label class="block text-sm font-medium text-gray-700" for="title" { "Title:" }
                input class=(INPUT_CLASS) type="text" name="title" id="title" value=(title);
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="director" { "Director:" }
                input class=(INPUT_CLASS) type="text" name="director" id="director" value=(director);
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="release_date" { "Release Date:" }
                input class=(INPUT_CLASS) type="text" name="release_date" id="release_date" value=(release_date);
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="opening_crawl" { "Opening Crawl:" }
                textarea class=(INPUT_CLASS) name="opening_crawl" id="opening_crawl" rows="6" { (opening_crawl) }
            }
            button class=(PRIMARY_BUTTON) type="submit" { (submit) }
        }
    }
}

use super::{el, text, Node};
use crate::domain::{Described, LaunchDetail, LaunchSummary};
use crate::services::{DetailOutcome, DetailState, SearchOutcome, SearchState};

const NOT_FOUND: &str = "Not found";
const NO_DESCRIPTION: &str = "No description found";

/// Wrap a rendered view in a complete HTML document.
pub fn document(title: &str, main: Node) -> String {
    let page = el(
        "html",
        &[("lang", "en")],
        [
            el(
                "head",
                &[],
                [
                    el("meta", &[("charset", "utf-8")], []),
                    el(
                        "meta",
                        &[
                            ("name", "viewport"),
                            ("content", "width=device-width, initial-scale=1"),
                        ],
                        [],
                    ),
                    el("title", &[], [text(title)]),
                ],
            ),
            el("body", &[], [main]),
        ],
    );
    format!("<!doctype html>\n{}", page.to_html())
}

fn search_form(query: Option<&str>, loading: bool) -> Node {
    let button = if loading {
        el("button", &[("disabled", "disabled")], [text("Search")])
    } else {
        el("button", &[], [text("Search")])
    };
    el(
        "form",
        &[("class", "search"), ("method", "get"), ("action", "/")],
        [
            el("input", &[("name", "query"), ("value", query.unwrap_or(""))], []),
            button,
        ],
    )
}

fn loading_indicator() -> Node {
    el("div", &[("class", "loading")], [text("Fetching data...")])
}

fn back_link() -> Node {
    el(
        "div",
        &[("class", "back")],
        [el(
            "a",
            &[("href", "/"), ("onclick", "history.back(); return false;")],
            [text("Back")],
        )],
    )
}

fn detail_href(id: &str) -> String {
    format!("/?id={}", urlencoding::encode(id))
}

fn result_item(result: &LaunchSummary) -> Node {
    let href = detail_href(&result.id);
    el(
        "li",
        &[("class", "results_result")],
        [el(
            "div",
            &[("class", "result")],
            [
                el(
                    "h3",
                    &[("class", "result_name")],
                    [el("a", &[("href", href.as_str())], [text(&result.name)])],
                ),
                el(
                    "p",
                    &[("class", "result_status")],
                    [text(format!("🚀 {}", result.status))],
                ),
                el(
                    "p",
                    &[("class", "result_mission")],
                    [text(format!("Mission: {}", result.mission))],
                ),
            ],
        )],
    )
}

fn search_results(query: &str, outcome: &SearchOutcome) -> Node {
    let items: Vec<Node> = match outcome {
        SearchOutcome::Error => vec![el(
            "li",
            &[],
            [text(format!("Error searching for {}", query))],
        )],
        SearchOutcome::Empty => vec![el(
            "li",
            &[],
            [text(format!("No results for {}", query))],
        )],
        SearchOutcome::Found(results) => results.iter().map(result_item).collect(),
    };
    el("ul", &[("class", "results")], items)
}

/// Front page: heading, search form and whatever the search state shows.
pub fn render_search_view(state: &SearchState) -> Node {
    let mut children = vec![
        el("h1", &[("class", "heading")], [text("Launch search 🚀")]),
        search_form(state.query(), state.is_loading()),
    ];

    match state {
        SearchState::Idle => {}
        SearchState::Loading { .. } => children.push(loading_indicator()),
        SearchState::Settled { query, outcome } => {
            children.push(search_results(query, outcome));
            children.push(back_link());
        }
    }

    el("main", &[], children)
}

fn labelled(tag: &'static str, class: &'static str, label: &str, value: Option<&str>) -> Node {
    match value {
        Some(value) => el(tag, &[("class", class)], [text(label), text(value)]),
        None => el(tag, &[("class", class)], [text(label), text(NOT_FOUND)]),
    }
}

fn description(class: &'static str, section: Option<&Described>) -> Node {
    let description = section.and_then(|s| s.description.as_deref());
    el("p", &[("class", class)], [text(description.unwrap_or(NO_DESCRIPTION))])
}

fn launch_sections(launch: &LaunchDetail) -> Vec<Node> {
    let status = launch.status.as_ref();
    let mission = launch.mission.as_ref();

    let image = match launch.image.as_deref() {
        Some(src) => el("img", &[("src", src), ("alt", launch.name.as_str())], []),
        None => el("p", &[("class", "no_image")], [text(format!("Image: {}", NOT_FOUND))]),
    };

    vec![
        el(
            "div",
            &[("class", "launch")],
            [el("h2", &[("class", "launch_title")], [text(&launch.name)])],
        ),
        el("h3", &[("class", "window_heading")], [text("Launch window")]),
        el(
            "ul",
            &[("class", "window")],
            [
                labelled("li", "window_start", "Window opens: ", launch.window_start.as_deref()),
                labelled("li", "window_end", "Window closes: ", launch.window_end.as_deref()),
            ],
        ),
        el(
            "div",
            &[("class", "status")],
            [
                labelled("h3", "status_name", "Status: ", status.and_then(|s| s.name.as_deref())),
                description("status_description", status),
            ],
        ),
        el(
            "div",
            &[("class", "mission")],
            [
                labelled("h3", "mission_name", "Mission: ", mission.and_then(|m| m.name.as_deref())),
                description("mission_description", mission),
            ],
        ),
        image,
    ]
}

/// Single launch page.
pub fn render_detail_view(state: &DetailState) -> Node {
    let children = match state {
        DetailState::Idle => Vec::new(),
        DetailState::Loading { .. } => vec![loading_indicator()],
        DetailState::Settled { id, outcome } => {
            let mut children = match outcome {
                DetailOutcome::NotFound => vec![el(
                    "p",
                    &[("class", "error")],
                    [text(format!(
                        "Oops, something went wrong. No launch found with id: {}",
                        id
                    ))],
                )],
                DetailOutcome::Found(launch) => launch_sections(launch),
            };
            children.push(back_link());
            children
        }
    };

    el("main", &[], children)
}

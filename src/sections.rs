//! Section renderers.
//!
//! Each renderer receives its target container explicitly and clears it
//! before repopulating, so calling one twice with the same input leaves the
//! same content as calling it once.

use crate::dom::{el, Document, Element};
use crate::model::{Link, Project};
use crate::rules::{self, IconRules};
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

const NEW_TAB: &str = "_blank";
const SAFE_REL: &str = "noopener noreferrer";

/// Set the text of the element with `id`; absent value clears it.
/// A missing element is ignored.
pub fn set_text(doc: &mut Document, id: &str, value: Option<&str>) {
    match doc.get_element_by_id_mut(id) {
        Some(node) => node.set_text_content(value.unwrap_or("")),
        None => log::debug!("placeholder #{} not present, skipping", id),
    }
}

/// Split `text` into paragraphs on blank lines
pub fn paragraphs(text: &str) -> Vec<&str> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn render_about(root: &mut Element, text: Option<&str>) {
    root.clear();
    for p in paragraphs(text.unwrap_or("")) {
        root.append(el("p", &[("text", p)], vec![]));
    }
}

fn icon_node(rules: &IconRules, link: &Link) -> Element {
    let icon = rules.icon_for(link);
    match icon.asset_path() {
        Some(src) => el(
            "img",
            &[("class", "icon"), ("src", src), ("alt", ""), ("aria-hidden", "true")],
            vec![],
        ),
        None => el(
            "span",
            &[("class", "icon"), ("aria-hidden", "true"), ("text", icon.glyph())],
            vec![],
        ),
    }
}

pub fn render_links(root: &mut Element, links: &[Link], rules: &IconRules) {
    root.clear();
    for link in links {
        let a = el(
            "a",
            &[
                ("class", "btn"),
                ("href", link.url.as_str()),
                ("target", NEW_TAB),
                ("rel", SAFE_REL),
            ],
            vec![
                icon_node(rules, link).into(),
                el("span", &[("text", link.label.as_str())], vec![]).into(),
                el("span", &[("text", "↗"), ("class", "muted")], vec![]).into(),
            ],
        );
        root.append(a);
    }
}

pub fn render_skills(root: &mut Element, skills: &[String]) {
    root.clear();
    for s in skills {
        root.append(el("span", &[("class", "chip"), ("text", s.as_str())], vec![]));
    }
}

fn badge(label: &str, href: &str) -> Element {
    el(
        "a",
        &[
            ("class", "badge"),
            ("href", href),
            ("target", NEW_TAB),
            ("rel", SAFE_REL),
            ("text", label),
        ],
        vec![],
    )
}

fn project_card(p: &Project) -> Element {
    let class = match rules::classify(&p.tags) {
        Some(theme) => format!("project {}", theme.css_class()),
        None => "project".to_string(),
    };

    let title = match p.url.as_deref() {
        Some(url) => el(
            "h3",
            &[],
            vec![el(
                "a",
                &[("href", url), ("target", NEW_TAB), ("rel", SAFE_REL), ("text", p.name.as_str())],
                vec![],
            )
            .into()],
        ),
        None => el("h3", &[("text", p.name.as_str())], vec![]),
    };
    let desc = el(
        "p",
        &[("class", "muted"), ("text", p.description.as_deref().unwrap_or(""))],
        vec![],
    );

    let mut actions = el("div", &[("class", "actions")], vec![]);
    if let Some(live) = p.links.live.as_deref() {
        actions.append(badge("Live", live));
    }
    if let Some(github) = p.links.github.as_deref() {
        actions.append(badge("GitHub", github));
    }

    let mut tags = el("div", &[("class", "tags")], vec![]);
    for t in &p.tags {
        tags.append(el("span", &[("class", "chip"), ("text", t.as_str())], vec![]));
    }

    el(
        "div",
        &[("class", class.as_str())],
        vec![title.into(), desc.into(), actions.into(), tags.into()],
    )
}

pub fn render_projects(root: &mut Element, projects: &[Project]) {
    root.clear();
    for p in projects {
        root.append(project_card(p));
    }
}

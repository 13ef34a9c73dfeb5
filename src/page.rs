//! Page assembly: load the profile document once and render every section.

use crate::dom::{el, Document, Element};
use crate::loader::DocumentSource;
use crate::model::ProfileDocument;
use crate::rules::IconRules;
use crate::sections;
use crate::{Error, PageConfig, Result};
use chrono::Datelike;

const ERROR_STYLE: &str = "padding:20px;color:#fff;";

/// Outcome of one load-and-render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Rendered,
    /// The page body was replaced by this error message
    Failed(String),
}

impl PageState {
    pub fn is_rendered(&self) -> bool {
        matches!(self, PageState::Rendered)
    }
}

/// Loads a profile document from `S` and renders it into host pages.
pub struct PageRenderer<S> {
    source: S,
    icons: IconRules,
    year: Option<i32>,
}

impl<S: DocumentSource> PageRenderer<S> {
    pub fn new(source: S, config: &PageConfig) -> Self {
        let icons = match config.personal_domain.as_deref() {
            Some(domain) => IconRules::default().with_personal_domain(domain),
            None => IconRules::default(),
        };
        Self {
            source,
            icons,
            year: config.year,
        }
    }

    pub fn icon_rules(&self) -> &IconRules {
        &self.icons
    }

    /// Run one pass against `page`.
    ///
    /// Sections are rendered into a copy that replaces `page` only when every
    /// step succeeded. On failure the body of `page` is replaced by the
    /// error text and nothing else is touched.
    pub fn render(&self, page: &mut Document) -> PageState {
        let mut working = page.clone();
        let result = self
            .source
            .load()
            .and_then(|doc| self.populate(&mut working, &doc));

        match result {
            Ok(()) => {
                *page = working;
                log::debug!("page rendered");
                PageState::Rendered
            }
            Err(e) => {
                log::warn!("page render failed: {}", e);
                let message = e.to_string();
                show_error(page, &message);
                PageState::Failed(message)
            }
        }
    }

    /// Parse `template`, render into it and serialize the result
    pub fn render_html(&self, template: &str) -> Result<(PageState, String)> {
        let mut page = Document::parse(template)?;
        let state = self.render(&mut page);
        Ok((state, page.to_html()))
    }

    fn populate(&self, page: &mut Document, doc: &ProfileDocument) -> Result<()> {
        sections::set_text(page, "name", doc.name.as_deref());
        sections::set_text(page, "tagline", doc.tagline.as_deref());
        let current = doc
            .current
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("Currently: {}", c));
        sections::set_text(page, "current", current.as_deref());
        let location = doc
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| format!("📍 {}", l));
        sections::set_text(page, "location", location.as_deref());

        sections::render_about(container(page, "about")?, doc.about.as_deref());
        sections::render_links(container(page, "links")?, &doc.links, &self.icons);
        sections::render_skills(container(page, "skills")?, &doc.skills);
        sections::render_projects(container(page, "projects")?, &doc.projects);

        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        sections::set_text(page, "year", Some(year.to_string().as_str()));
        Ok(())
    }
}

fn container<'a>(page: &'a mut Document, id: &str) -> Result<&'a mut Element> {
    page.get_element_by_id_mut(id)
        .ok_or_else(|| Error::RenderError(format!("missing container #{}", id)))
}

/// Replace the whole visible page with a plain-text error
pub fn show_error(page: &mut Document, message: &str) {
    if let Some(body) = page.body_mut() {
        body.clear();
        body.append(el("pre", &[("style", ERROR_STYLE), ("text", message)], vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticSource;

    struct FailingSource;

    impl DocumentSource for FailingSource {
        fn load(&self) -> Result<ProfileDocument> {
            Err(Error::LoadError { status: 500 })
        }
    }

    fn fixed_year() -> PageConfig {
        PageConfig {
            year: Some(2024),
            ..Default::default()
        }
    }

    #[test]
    fn renders_text_fields_with_prefixes() {
        let src = StaticSource::from_json(
            r#"{"name":"Ada","tagline":"Engineer","current":"Building things","location":"London"}"#,
        )
        .unwrap();
        let renderer = PageRenderer::new(src, &fixed_year());
        let mut page = Document::default();

        assert_eq!(renderer.render(&mut page), PageState::Rendered);
        let text = |id: &str| page.get_element_by_id(id).unwrap().text_content();
        assert_eq!(text("name"), "Ada");
        assert_eq!(text("tagline"), "Engineer");
        assert_eq!(text("current"), "Currently: Building things");
        assert_eq!(text("location"), "📍 London");
        assert_eq!(text("year"), "2024");
    }

    #[test]
    fn empty_current_and_location_get_no_prefix() {
        let src = StaticSource::from_json(r#"{"name":"A","location":"","current":""}"#).unwrap();
        let renderer = PageRenderer::new(src, &fixed_year());
        let mut page = Document::default();
        assert!(renderer.render(&mut page).is_rendered());
        assert_eq!(page.get_element_by_id("current").unwrap().text_content(), "");
        assert_eq!(page.get_element_by_id("location").unwrap().text_content(), "");
    }

    #[test]
    fn null_fields_render_empty_sections() {
        let src = StaticSource::from_json(
            r#"{"name":"A","links":null,"skills":null,"projects":[{"name":"P","tags":null,"links":null}]}"#,
        )
        .unwrap();
        let renderer = PageRenderer::new(src, &fixed_year());
        let mut page = Document::default();
        assert!(renderer.render(&mut page).is_rendered());
        assert!(page.get_element_by_id("links").unwrap().children().is_empty());
        assert!(page.get_element_by_id("skills").unwrap().children().is_empty());
        let projects = page.get_element_by_id("projects").unwrap();
        let card = projects.child_elements().next().unwrap();
        assert_eq!(card.class_name(), "project");
        assert_eq!(card.find_all("h3")[0].text_content(), "P");
    }

    #[test]
    fn name_only_document_leaves_sections_empty() {
        let renderer = PageRenderer::new(StaticSource::from_json(r#"{"name":"A"}"#).unwrap(), &fixed_year());
        let mut page = Document::default();
        assert!(renderer.render(&mut page).is_rendered());
        assert_eq!(page.get_element_by_id("name").unwrap().text_content(), "A");
        for id in ["tagline", "current", "location", "about", "links", "skills", "projects"] {
            assert!(page.get_element_by_id(id).unwrap().children().is_empty(), "#{} not empty", id);
        }
    }

    #[test]
    fn failure_replaces_body_with_error() {
        let renderer = PageRenderer::new(FailingSource, &fixed_year());
        let mut page = Document::default();
        let state = renderer.render(&mut page);

        assert_eq!(state, PageState::Failed("Failed to load profile document: HTTP 500".into()));
        assert!(page.get_element_by_id("name").is_none());
        let body = page.body().unwrap();
        let pre: Vec<&Element> = body.child_elements().collect();
        assert_eq!(pre.len(), 1);
        assert_eq!(pre[0].tag(), "pre");
        assert_eq!(pre[0].attr("style"), Some("padding:20px;color:#fff;"));
        assert_eq!(pre[0].text_content(), "Failed to load profile document: HTTP 500");
    }

    #[test]
    fn missing_container_fails_without_partial_render() {
        let template = r#"<html><body><h1 id="name"></h1><div id="about"></div></body></html>"#;
        let src = StaticSource::from_json(r#"{"name":"A","about":"x"}"#).unwrap();
        let renderer = PageRenderer::new(src, &fixed_year());
        let (state, html) = renderer.render_html(template).unwrap();

        assert_eq!(state, PageState::Failed("Rendering failed: missing container #links".into()));
        assert!(!html.contains("<h1"));
        assert!(html.contains("<pre"));
    }

    #[test]
    fn rendering_twice_is_stable() {
        let src = StaticSource::from_json(
            r#"{"name":"A","about":"x\n\ny","skills":["Rust"],"links":[{"label":"Code","url":"https://github.com/a"}]}"#,
        )
        .unwrap();
        let renderer = PageRenderer::new(src, &fixed_year());
        let mut once = Document::default();
        renderer.render(&mut once);
        let mut twice = once.clone();
        renderer.render(&mut twice);
        assert_eq!(once.to_html(), twice.to_html());
    }

    #[test]
    fn personal_domain_reaches_icon_rules() {
        let cfg = PageConfig {
            personal_domain: Some("ada.dev".into()),
            ..fixed_year()
        };
        let renderer = PageRenderer::new(StaticSource::default(), &cfg);
        assert_eq!(renderer.icon_rules().hosts().len(), 2);
    }
}

//! Ordered rule tables for link icons and project themes.
//!
//! Both tables are evaluated top to bottom and the first matching rule
//! wins. Keep new rules in precedence order.

use crate::model::Link;
use std::collections::HashSet;

/// Icon shown in front of a link label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkIcon {
    Pdf,
    GitHub,
    LinkedIn,
    Website,
    /// http(s) link to an unknown host
    External,
    /// Anything else (relative paths, mailto:, ...)
    Generic,
}

impl LinkIcon {
    /// Relative asset path for image icons; `None` for glyph icons
    pub fn asset_path(self) -> Option<&'static str> {
        match self {
            LinkIcon::Pdf => Some("assets/icons/pdf.svg"),
            LinkIcon::GitHub => Some("assets/icons/github.svg"),
            LinkIcon::LinkedIn => Some("assets/icons/linkedin.svg"),
            LinkIcon::Website => Some("assets/icons/website.svg"),
            LinkIcon::External | LinkIcon::Generic => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            LinkIcon::External => "🌐",
            _ => "🔗",
        }
    }
}

type IconMatcher = fn(&Link, &[HostRule]) -> Option<LinkIcon>;

/// One entry of the icon table
#[derive(Clone, Copy)]
pub struct IconRule {
    pub name: &'static str,
    pub matches: IconMatcher,
}

/// Maps a hostname (or any subdomain of it) to an icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRule {
    pub domain: String,
    pub icon: LinkIcon,
}

impl HostRule {
    pub fn new(domain: impl Into<String>, icon: LinkIcon) -> Self {
        Self {
            domain: domain.into().to_ascii_lowercase(),
            icon,
        }
    }

    fn matches_host(&self, host: &str) -> bool {
        host == self.domain
            || host
                .strip_suffix(self.domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

pub const ICON_RULES: &[IconRule] = &[
    IconRule { name: "pdf", matches: match_pdf },
    IconRule { name: "github", matches: match_github },
    IconRule { name: "web", matches: match_web },
    IconRule { name: "fallback", matches: match_any },
];

fn match_any(_: &Link, _: &[HostRule]) -> Option<LinkIcon> {
    Some(LinkIcon::Generic)
}

fn match_pdf(link: &Link, _: &[HostRule]) -> Option<LinkIcon> {
    let label = link.label.to_lowercase();
    let url = link.url.to_lowercase();
    (label.contains("cv") || url.ends_with(".pdf")).then_some(LinkIcon::Pdf)
}

fn match_github(link: &Link, _: &[HostRule]) -> Option<LinkIcon> {
    let hit = link.label.to_lowercase().contains("github") || link.url.to_lowercase().contains("github");
    hit.then_some(LinkIcon::GitHub)
}

fn match_web(link: &Link, hosts: &[HostRule]) -> Option<LinkIcon> {
    let parsed = url::Url::parse(&link.url).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    let host = parsed.host_str().unwrap_or("").to_ascii_lowercase();
    let icon = hosts
        .iter()
        .find(|r| r.matches_host(&host))
        .map(|r| r.icon)
        .unwrap_or(LinkIcon::External);
    Some(icon)
}

/// The icon table together with the known-host list it consults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRules {
    hosts: Vec<HostRule>,
}

impl Default for IconRules {
    fn default() -> Self {
        Self {
            hosts: vec![HostRule::new("linkedin.com", LinkIcon::LinkedIn)],
        }
    }
}

impl IconRules {
    /// Add the owner's own domain; links to it get the website icon
    pub fn with_personal_domain(mut self, domain: &str) -> Self {
        self.hosts.push(HostRule::new(domain, LinkIcon::Website));
        self
    }

    pub fn hosts(&self) -> &[HostRule] {
        &self.hosts
    }

    pub fn icon_for(&self, link: &Link) -> LinkIcon {
        self.resolve(link).1
    }

    /// Name of the winning rule and its icon
    pub fn resolve(&self, link: &Link) -> (&'static str, LinkIcon) {
        ICON_RULES
            .iter()
            .find_map(|rule| (rule.matches)(link, &self.hosts).map(|icon| (rule.name, icon)))
            .unwrap_or(("fallback", LinkIcon::Generic))
    }
}

/// Keyword groups used for theme classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroup {
    Frontend,
    Backend,
    Infra,
}

impl TagGroup {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TagGroup::Frontend => &[
                "frontend", "react", "vue", "svelte", "angular", "javascript", "typescript",
                "html", "css", "tailwind", "nextjs", "next.js",
            ],
            TagGroup::Backend => &[
                "backend", "python", "node", "nodejs", "node.js", "express", "django", "flask",
                "fastapi", "rust", "go", "java", "sql", "postgres", "postgresql", "mongodb",
                "api",
            ],
            TagGroup::Infra => &[
                "infra", "docker", "kubernetes", "k8s", "aws", "gcp", "azure", "terraform",
                "linux", "nginx", "devops", "ci/cd",
            ],
        }
    }

    fn present_in(self, tags: &HashSet<String>) -> bool {
        self.keywords().iter().any(|k| tags.contains(*k))
    }
}

/// Cosmetic class derived from a project's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Fullstack,
    Backend,
    Frontend,
    Infra,
}

impl Theme {
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Fullstack => "theme-fullstack",
            Theme::Backend => "theme-backend",
            Theme::Frontend => "theme-frontend",
            Theme::Infra => "theme-infra",
        }
    }
}

pub struct ThemeRule {
    pub requires: &'static [TagGroup],
    pub excludes: &'static [TagGroup],
    pub theme: Theme,
}

pub const THEME_RULES: &[ThemeRule] = &[
    ThemeRule {
        requires: &[TagGroup::Frontend, TagGroup::Backend],
        excludes: &[],
        theme: Theme::Fullstack,
    },
    ThemeRule {
        requires: &[TagGroup::Backend],
        excludes: &[TagGroup::Frontend],
        theme: Theme::Backend,
    },
    ThemeRule {
        requires: &[TagGroup::Frontend],
        excludes: &[TagGroup::Backend],
        theme: Theme::Frontend,
    },
    ThemeRule {
        requires: &[TagGroup::Infra],
        excludes: &[],
        theme: Theme::Infra,
    },
];

/// Lower-cased tag set of a project
pub fn tag_set<S: AsRef<str>>(tags: &[S]) -> HashSet<String> {
    tags.iter().map(|t| t.as_ref().trim().to_lowercase()).collect()
}

pub fn classify<S: AsRef<str>>(tags: &[S]) -> Option<Theme> {
    let set = tag_set(tags);
    THEME_RULES
        .iter()
        .find(|rule| {
            rule.requires.iter().all(|g| g.present_in(&set))
                && !rule.excludes.iter().any(|g| g.present_in(&set))
        })
        .map(|rule| rule.theme)
}

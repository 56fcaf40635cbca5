//! Portfolio content and its vertical layout.

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

/// Content shown when no content file is configured.
const BUILTIN_CONTENT: &str = include_str!("../assets/portfolio.toml");

/// Id of the hero section at the top of the page.
pub const HOME_ID: &str = "home";

/// Rows taken by a section title and its underline.
const SECTION_HEADER_ROWS: u16 = 2;

/// Blank rows after each section.
const SECTION_GAP_ROWS: u16 = 2;

/// Smallest hero height, for very short terminals.
const MIN_HERO_ROWS: u16 = 8;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioContent {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl PortfolioContent {
    pub fn builtin() -> Result<Self> {
        toml::from_str(BUILTIN_CONTENT).wrap_err("built-in portfolio content is invalid")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read content {}", path.display()))?;
        toml::from_str(&text).wrap_err_with(|| format!("failed to parse content {}", path.display()))
    }

    /// Navigation entries: the hero first, then every section.
    pub fn nav_entries(&self) -> Vec<(&str, &str)> {
        std::iter::once((HOME_ID, "Home"))
            .chain(
                self.sections
                    .iter()
                    .map(|s| (s.id.as_str(), s.title.as_str())),
            )
            .collect()
    }
}

/// Vertical extent of one section, in document rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: String,
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && u32::from(row) < u32::from(self.top) + u32::from(self.height)
    }
}

/// Where every section sits in the scrolling document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Hero first, then the content sections in order.
    pub spans: Vec<SectionSpan>,
    pub total_height: u16,
}

impl PageLayout {
    /// Lay out `content` for a viewport `viewport_rows` tall. The hero fills
    /// the first screen.
    pub fn compute(content: &PortfolioContent, viewport_rows: u16) -> Self {
        let hero_height = viewport_rows.max(MIN_HERO_ROWS);
        let mut spans = vec![SectionSpan {
            id: HOME_ID.to_string(),
            top: 0,
            height: hero_height,
        }];

        let mut top = hero_height;
        for section in &content.sections {
            let body = u16::try_from(section.body.len()).unwrap_or(u16::MAX);
            let height = SECTION_HEADER_ROWS
                .saturating_add(body)
                .saturating_add(SECTION_GAP_ROWS);
            spans.push(SectionSpan {
                id: section.id.clone(),
                top,
                height,
            });
            top = top.saturating_add(height);
        }

        Self {
            spans,
            total_height: top,
        }
    }

    /// Top row of the first section after the hero.
    pub fn first_section_top(&self) -> Option<u16> {
        self.spans.get(1).map(|s| s.top)
    }

    /// Largest useful scroll offset for a viewport `viewport_rows` tall.
    pub fn max_scroll(&self, viewport_rows: u16) -> u16 {
        self.total_height.saturating_sub(viewport_rows)
    }
}

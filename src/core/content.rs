//! Portfolio content model: everything shown on the page, loaded from TOML.
//!
//! The bundled default lives in `assets/portfolio.toml` and is compiled into
//! the binary; `--content <path>` swaps in a user file with the same shape.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::typewriter::TypewriterConfig;

/// Raw text of the bundled portfolio.
pub const BUILTIN_TOML: &str = include_str!("../../assets/portfolio.toml");

/// Errors that can occur while loading portfolio content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid portfolio content: {message}")]
    Invalid { message: String },
}

// ───────────────────────────────────────── sections ──────────

/// Navigable page anchors, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

impl Section {
    pub const ALL: &[Section] = &[
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Education,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Contact => "Contact",
        }
    }

    /// Section bound to the digit key `n` (1-based).
    pub fn from_number(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }
}

// ───────────────────────────────────────── model ─────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Name used in the hero greeting; falls back to `name`.
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    /// Phrases cycled by the headline typewriter.
    pub headline_phrases: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

fn default_greeting() -> String {
    "Hi, I'm".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Training {
    pub title: String,
    #[serde(default)]
    pub period: String,
    /// Still in progress; rendered with a `LIVE` badge.
    #[serde(default)]
    pub live: bool,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Certification {
    pub title: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct School {
    pub abbr: String,
    pub name: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// The whole page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub training: Vec<Training>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub education: Vec<School>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
}

impl Portfolio {
    /// The bundled portfolio.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::parse(BUILTIN_TOML, Path::new("<builtin>"))
    }

    /// Read, parse and validate a content file.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ContentError> {
        let portfolio: Portfolio = toml::from_str(content).map_err(|e| ContentError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Checks:
    /// - the profile has a name
    /// - there is at least one headline phrase and none is blank
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::Invalid {
                message: "profile.name must not be empty".into(),
            });
        }
        if self.profile.headline_phrases.is_empty() {
            return Err(ContentError::Invalid {
                message: "profile.headline_phrases needs at least one phrase".into(),
            });
        }
        if self
            .profile
            .headline_phrases
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(ContentError::Invalid {
                message: "profile.headline_phrases must not contain blank phrases".into(),
            });
        }
        Ok(())
    }

    /// Typewriter configuration for the hero headline, default timings.
    pub fn headline_config(&self) -> TypewriterConfig {
        TypewriterConfig::new(self.profile.headline_phrases.iter().cloned())
    }
}

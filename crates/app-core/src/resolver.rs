//! TeraBox link resolution
//!
//! This module turns a pasted TeraBox sharing link into the data needed to
//! show it in an embedded frame: the embed URL, the original link, and a
//! display title. Resolution is pure pattern matching; it never touches the
//! network, so a resolved embed URL is only a candidate until the frame
//! actually loads it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur while resolving a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was empty after trimming
    #[error("Please enter a TeraBox URL")]
    EmptyInput,

    /// Input did not match any recognized link shape
    #[error("Invalid TeraBox URL format. Please provide a valid TeraBox sharing link.")]
    UnrecognizedFormat,
}

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Template used to turn a token into an embed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmbedStrategy {
    /// `terabox.com/sharing/embed?surl=`
    #[default]
    SharingEmbed,
    /// `terabox.com/embed/`
    PathEmbed,
    /// `1024terabox.com/sharing/embed?surl=`
    MirrorSharingEmbed,
}

impl EmbedStrategy {
    /// All strategies, primary first
    pub const ALL: [EmbedStrategy; 3] = [
        EmbedStrategy::SharingEmbed,
        EmbedStrategy::PathEmbed,
        EmbedStrategy::MirrorSharingEmbed,
    ];

    /// Build the embed URL for a token
    pub fn embed_url(&self, token: &str) -> String {
        match self {
            EmbedStrategy::SharingEmbed => {
                format!("https://terabox.com/sharing/embed?surl={}", token)
            }
            EmbedStrategy::PathEmbed => format!("https://terabox.com/embed/{}", token),
            EmbedStrategy::MirrorSharingEmbed => {
                format!("https://1024terabox.com/sharing/embed?surl={}", token)
            }
        }
    }

    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedStrategy::SharingEmbed => "sharingEmbed",
            EmbedStrategy::PathEmbed => "pathEmbed",
            EmbedStrategy::MirrorSharingEmbed => "mirrorSharingEmbed",
        }
    }
}

/// A recognized link shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkShape {
    /// Pattern capturing the token in group 1
    pub pattern: &'static str,
    /// Human-readable example of the shape
    pub example: &'static str,
}

/// Recognized link shapes, in match order
///
/// Every shape is host-qualified, so order only decides which capture group
/// supplies the token when more than one could match.
pub const LINK_SHAPES: [LinkShape; 4] = [
    LinkShape {
        pattern: r"terabox\.com/s/([a-zA-Z0-9_-]+)",
        example: "https://terabox.com/s/xxxxxxxxx",
    },
    LinkShape {
        pattern: r"terabox\.com/sharing/link\?surl=([a-zA-Z0-9_-]+)",
        example: "https://terabox.com/sharing/link?surl=xxxxxxxxx",
    },
    LinkShape {
        pattern: r"1024terabox\.com/s/([a-zA-Z0-9_-]+)",
        example: "https://1024terabox.com/s/xxxxxxxxx",
    },
    LinkShape {
        pattern: r"teraboxapp\.com/s/([a-zA-Z0-9_-]+)",
        example: "https://teraboxapp.com/s/xxxxxxxxx",
    },
];

/// Examples of every supported link format, for help text
pub fn supported_formats() -> impl Iterator<Item = &'static str> {
    let shapes: &'static [LinkShape] = &LINK_SHAPES;
    shapes.iter().map(|shape| shape.example)
}

fn compiled_shapes() -> &'static [Regex] {
    static SHAPES: OnceLock<Vec<Regex>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        LINK_SHAPES
            .iter()
            .map(|shape| Regex::new(shape.pattern).unwrap())
            .collect()
    })
}

/// A link that resolved to an embeddable video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVideo {
    /// Token captured from the link
    pub token: String,
    /// URL to load in the embedded frame
    pub embed_url: String,
    /// The link exactly as the user supplied it
    pub direct_url: String,
    /// Display title
    pub title: String,
}

impl ResolvedVideo {
    /// Build a resolved video from a token using the given strategy
    pub fn new(
        token: impl Into<String>,
        direct_url: impl Into<String>,
        strategy: EmbedStrategy,
    ) -> Self {
        let token = token.into();
        Self {
            embed_url: strategy.embed_url(&token),
            title: format!("TeraBox Video - {}", token),
            direct_url: direct_url.into(),
            token,
        }
    }

    /// Embed URLs for every strategy, primary first
    pub fn candidate_embed_urls(&self) -> Vec<String> {
        EmbedStrategy::ALL
            .iter()
            .map(|strategy| strategy.embed_url(&self.token))
            .collect()
    }
}

/// Something that can turn raw input into a [`ResolvedVideo`]
pub trait LinkResolver {
    /// Resolve raw user input
    fn resolve(&self, raw: &str) -> Result<ResolvedVideo>;
}

/// Resolver for TeraBox sharing links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeraboxResolver {
    strategy: EmbedStrategy,
}

impl TeraboxResolver {
    /// Create a resolver using the default embed strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver using a specific embed strategy
    pub fn with_strategy(strategy: EmbedStrategy) -> Self {
        Self { strategy }
    }

    /// Embed strategy in use
    pub fn strategy(&self) -> EmbedStrategy {
        self.strategy
    }

    /// Extract the token from a link, if it matches a known shape
    pub fn extract_token(url: &str) -> Option<&str> {
        compiled_shapes()
            .iter()
            .find_map(|re| re.captures(url))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl LinkResolver for TeraboxResolver {
    fn resolve(&self, raw: &str) -> Result<ResolvedVideo> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let token = Self::extract_token(trimmed).ok_or(ValidationError::UnrecognizedFormat)?;
        tracing::debug!(token, strategy = self.strategy.as_str(), "Resolved TeraBox link");

        Ok(ResolvedVideo::new(token, raw, self.strategy))
    }
}

/// Resolve a link with the default resolver
pub fn resolve(raw: &str) -> Result<ResolvedVideo> {
    TeraboxResolver::new().resolve(raw)
}

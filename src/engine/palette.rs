//! Keyword → tag color mapping for product names.
//!
//! Matching is first-hit in declaration order, not longest or most specific
//! keyword: a name containing both `ser` and `mleko` takes the color of
//! whichever rule is listed first. Reordering the rules changes results.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Color used when no keyword matches
pub const DEFAULT_TAG_COLOR: &str = "#9E9E9E";

const BUILTIN_RULES: &[(&str, &str)] = &[
    ("mleko", "#E3F2FD"),
    ("jogurt", "#E1F5FE"),
    ("ser", "#FFF59D"),
    ("masło", "#FFE082"),
    ("jaj", "#FFCC80"),
    ("chleb", "#D7CCC8"),
    ("bułk", "#BCAAA4"),
    ("mąka", "#F5F5F5"),
    ("cukier", "#FAFAFA"),
    ("makaron", "#FFE0B2"),
    ("ryż", "#F0F4C3"),
    ("kawa", "#8D6E63"),
    ("herbata", "#A5D6A7"),
    ("sok", "#FFAB91"),
    ("woda", "#81D4FA"),
    ("jabł", "#C5E1A5"),
    ("mięso", "#EF9A9A"),
    ("kurczak", "#FFCDD2"),
    ("ryba", "#90CAF9"),
    ("mydło", "#CE93D8"),
    ("papier", "#B0BEC5"),
    ("proszek", "#B39DDB"),
];

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern compiles"));

/// Whether `color` is a `#RRGGBB` literal
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// One keyword binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    pub keyword: String,
    pub color: String,
}

/// Ordered keyword rules plus a fallback color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPalette")]
pub struct Palette {
    rules: Vec<ColorRule>,
    default_color: String,
}

#[derive(Deserialize)]
struct RawPalette {
    #[serde(default = "builtin_rules")]
    rules: Vec<ColorRule>,
    #[serde(default = "default_color")]
    default_color: String,
}

impl From<RawPalette> for Palette {
    fn from(raw: RawPalette) -> Self {
        Palette::new(raw.rules, raw.default_color)
    }
}

fn builtin_rules() -> Vec<ColorRule> {
    BUILTIN_RULES
        .iter()
        .map(|(keyword, color)| ColorRule {
            keyword: (*keyword).to_string(),
            color: (*color).to_string(),
        })
        .collect()
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
            default_color: default_color(),
        }
    }
}

impl Palette {
    /// Build a palette from rules in priority order
    ///
    /// Keywords are case-folded here so lookups only fold the product name.
    pub fn new(rules: Vec<ColorRule>, default_color: impl Into<String>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ColorRule {
                keyword: rule.keyword.to_lowercase(),
                color: rule.color,
            })
            .collect();
        Self {
            rules,
            default_color: default_color.into(),
        }
    }

    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Colors that aren't `#RRGGBB` literals, in rule order, default last
    pub fn invalid_colors(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|rule| rule.color.as_str())
            .chain(std::iter::once(self.default_color.as_str()))
            .filter(|color| !is_hex_color(color))
            .collect()
    }

    /// Color of the first keyword contained in `name`, or the default
    pub fn tag_color(&self, name: &str) -> &str {
        let folded = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| !rule.keyword.is_empty() && folded.contains(rule.keyword.as_str()))
            .map_or(self.default_color.as_str(), |rule| rule.color.as_str())
    }
}

static BUILTIN_PALETTE: Lazy<Palette> = Lazy::new(Palette::default);

/// Tag color from the built-in palette
pub fn tag_color(name: &str) -> &'static str {
    BUILTIN_PALETTE.tag_color(name)
}

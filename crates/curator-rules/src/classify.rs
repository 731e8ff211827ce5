//! Display metadata derived from filenames.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Category;

/// Visual style tag used by the site's gallery filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Gritty,
    Clean,
    Hero,
    Emblem,
    Default,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Gritty => "gritty",
            Style::Clean => "clean",
            Style::Hero => "hero",
            Style::Emblem => "emblem",
            Style::Default => "default",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rarity badge shown on gallery cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Legendary,
    Rare,
    Uncommon,
    Common,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Legendary => "legendary",
            Rarity::Rare => "rare",
            Rarity::Uncommon => "uncommon",
            Rarity::Common => "common",
        }
    }

    /// Capitalised badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Legendary => "Legendary",
            Rarity::Rare => "Rare",
            Rarity::Uncommon => "Uncommon",
            Rarity::Common => "Common",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style keywords, first match wins.
const STYLE_KEYWORDS: &[(&[&str], Style)] = &[
    (&["gritty", "worn", "damaged"], Style::Gritty),
    (&["clean", "pristine", "new"], Style::Clean),
    (&["hero", "render"], Style::Hero),
    (&["emblem", "insignia"], Style::Emblem),
];

/// Rarity keywords, first match wins.
const RARITY_KEYWORDS: &[(&[&str], Rarity)] = &[
    (&["legendary", "hero", "unique"], Rarity::Legendary),
    (&["rare", "enhanced", "elite"], Rarity::Rare),
    (&["uncommon", "improved", "advanced"], Rarity::Uncommon),
];

/// Description keywords per category, first match wins.
fn description_table(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Environments => &[
            ("metro", "Underground transit system"),
            ("iez", "Industrial Exclusion Zone facility"),
            ("research", "Pre-cascade laboratory complex"),
            ("security", "Military checkpoint installation"),
            ("bunker", "Fortified underground shelter"),
            ("tech", "Technology sector ruins"),
        ],
        Category::Vehicles => &[
            ("walker", "Bipedal assault platform"),
            ("helo", "Rotorcraft reconnaissance unit"),
            ("apc", "Armored troop transport"),
        ],
        Category::Weapons => &[
            ("plasma", "High-energy particle weapon"),
            ("ion", "Directed energy system"),
            ("rifle", "Standard infantry firearm"),
        ],
        Category::Factions => &[
            ("directorate", "Sky Bastion military order"),
            ("scavenger", "Salvage specialist organization"),
            ("free77", "Professional mercenary company"),
            ("nomad", "Mobile clan federation"),
            ("warden", "Neutral civic coalition"),
        ],
        Category::Renders => &[("hero", "Showcase render")],
        Category::Ui => &[("icon", "Interface element")],
    }
}

fn strip_extension(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

/// Human-readable title: extension dropped, separators to spaces, each word
/// capitalised.
pub fn title_case(filename: &str) -> String {
    let stem = strip_extension(filename);
    let mut out = String::with_capacity(stem.len());
    let mut last_was_separator = false;
    for c in stem.chars() {
        if c == '_' || c == '-' {
            if !last_was_separator {
                out.push(' ');
            }
            last_was_separator = true;
        } else {
            out.push(c);
            last_was_separator = false;
        }
    }

    let mut titled = String::with_capacity(out.len());
    let mut at_word_start = true;
    for c in out.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                titled.extend(c.to_uppercase());
            } else {
                titled.push(c);
            }
            at_word_start = false;
        } else {
            titled.push(c);
            at_word_start = true;
        }
    }
    titled
}

/// Style tag for `filename`.
pub fn detect_style(filename: &str) -> Style {
    let lower = filename.to_lowercase();
    STYLE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Style::Default, |(_, style)| *style)
}

/// Short description for `filename` within `category`.
pub fn detect_description(filename: &str, category: Category) -> String {
    let lower = filename.to_lowercase();
    description_table(category)
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or_else(
            || format!("{} asset", category.label()),
            |(_, description)| description.to_string(),
        )
}

/// Rarity badge for `filename`.
pub fn detect_rarity(filename: &str) -> Rarity {
    let lower = filename.to_lowercase();
    RARITY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Rarity::Common, |(_, rarity)| *rarity)
}

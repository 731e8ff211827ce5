//! Gallery fragment (gallery-items.html)
//!
//! One `asset-item` block per curated asset. The site injects the fragment
//! into its gallery grid as-is, so there is no surrounding document.

use std::fs;
use std::io;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::curate::CuratedAsset;

/// Render one gallery block.
pub fn render_item(asset: &CuratedAsset, asset_base: &str) -> String {
    let category = asset.category().as_str();
    let src = format!("{}/{}/{}", asset_base, category, asset.filename());

    format!(
        r#"<div class="asset-item" data-category="{category}" data-style="{style}">
  <img src="{src}" alt="{alt}" class="asset-image" loading="lazy">
  <div class="asset-overlay">
    <h4>{display}</h4>
    <p>{description}</p>
    <span class="rarity-tag {rarity}">{rarity_label}</span>
  </div>
</div>"#,
        category = category,
        style = asset.style.as_str(),
        src = encode_double_quoted_attribute(&src),
        alt = encode_double_quoted_attribute(&asset.display_name),
        display = encode_text(&asset.display_name),
        description = encode_text(&asset.description),
        rarity = asset.rarity.as_str(),
        rarity_label = asset.rarity.label(),
    )
}

/// Render the whole fragment: blocks joined by newlines, no trailing newline.
pub fn render_fragment<'a, I>(assets: I, asset_base: &str) -> String
where
    I: IntoIterator<Item = &'a CuratedAsset>,
{
    assets
        .into_iter()
        .map(|a| render_item(a, asset_base))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the fragment, replacing any previous content.
pub fn write_fragment(path: &Path, fragment: &str) -> io::Result<()> {
    fs::write(path, fragment)
}

//! Filter predicates: image extensions and disallowed pipeline output.

/// Accepted image extensions (lowercase, without dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Markers identifying experimental or low-quality generator output.
///
/// Matched case-insensitively as substrings. This is the superset of the
/// scanner list and the site's client-side re-filter list.
pub const DISALLOW_MARKERS: &[&str] = &[
    "SWEEP",
    "ROLLBACK",
    "BASE720",
    "UPSCALE",
    "BICUBIC",
    "NEAREST",
    "TEST",
    "TG_Style",
    "TG_VAR",
    "TG_UPSCALE",
    "DPM",
    "CRISP_",
];

/// True if `name` ends in an accepted image extension (any case).
pub fn is_image(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        let ext = ext.to_ascii_lowercase();
        IMAGE_EXTENSIONS.contains(&ext.as_str())
    })
}

/// The first disallow marker found in `name`, if any.
pub fn disallow_marker(name: &str) -> Option<&'static str> {
    let upper = name.to_ascii_uppercase();
    DISALLOW_MARKERS
        .iter()
        .copied()
        .find(|marker| upper.contains(&marker.to_ascii_uppercase()))
}

/// True if `name` matches any disallow marker.
pub fn is_disallowed(name: &str) -> bool {
    disallow_marker(name).is_some()
}

/// True if `name` survives the filter stage.
pub fn is_admitted(name: &str) -> bool {
    is_image(name) && !is_disallowed(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        assert!(is_image("hero-main.png"));
        assert!(is_image("photo.JPG"));
        assert!(is_image("photo.jpeg"));
        assert!(is_image("anim.gif"));
        assert!(is_image("shot.WebP"));
    }

    #[test]
    fn test_non_images() {
        assert!(!is_image("manifest.json"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("png"));
        assert!(!is_image("archive.png.zip"));
        assert!(!is_image(""));
    }

    #[test]
    fn test_disallow_case_insensitive() {
        assert!(is_disallowed("metro_SWEEP_01.png"));
        assert!(is_disallowed("metro_sweep_01.png"));
        assert!(is_disallowed("hero-upscale.png"));
        assert!(is_disallowed("Latest.png")); // contains "test"
        assert!(is_disallowed("tg_style_a.png"));
        assert!(is_disallowed("crisp_edges.png"));
    }

    #[test]
    fn test_disallow_marker_reported() {
        assert_eq!(disallow_marker("x_ROLLBACK.png"), Some("ROLLBACK"));
        assert_eq!(disallow_marker("TG_UPSCALE_2x.png"), Some("UPSCALE"));
        assert_eq!(disallow_marker("metro-corridor-premium.png"), None);
    }

    #[test]
    fn test_crisp_requires_underscore() {
        assert!(!is_disallowed("crisp-render.png"));
    }

    #[test]
    fn test_admitted() {
        assert!(is_admitted("iez-facility-clean.png"));
        assert!(!is_admitted("iez-facility-clean.txt"));
        assert!(!is_admitted("iez_BICUBIC.png"));
    }
}

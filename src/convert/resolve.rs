//! Default Resolution
//!
//! Every section converter asks here for effective alignment, background
//! color, overlay strength and padding fallbacks, so the override order
//! (explicit field > archetype default > none) is the same everywhere.

use crate::layout::{Background, BackgroundKind, Padding, Section, Side, TextAlign};

/// Archetypes whose content is centered unless the section says otherwise.
pub const DEFAULT_SECTION_ALIGN: &[(&str, TextAlign)] = &[
    ("hero", TextAlign::Center),
    ("cta", TextAlign::Center),
    ("call-to-action", TextAlign::Center),
    ("image-gallery", TextAlign::Center),
    ("gallery", TextAlign::Center),
    ("properties-grid", TextAlign::Center),
    ("features", TextAlign::Center),
    ("stats", TextAlign::Center),
    ("testimonial", TextAlign::Center),
    ("quote", TextAlign::Center),
    ("logo-strip", TextAlign::Center),
    ("text-section", TextAlign::Center),
    ("content", TextAlign::Center),
];

/// Overlay strength when a background image names none.
pub const DEFAULT_DIM_RATIO: u32 = 50;

pub fn archetype_align(kind: &str) -> Option<TextAlign> {
    DEFAULT_SECTION_ALIGN
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, align)| *align)
}

/// Explicit section `align`, else the archetype default, else none.
pub fn section_align(section: &Section) -> Option<TextAlign> {
    section.align.or_else(|| archetype_align(&section.kind))
}

/// An item's own alignment always beats the one handed down to it.
pub fn item_align(own: Option<TextAlign>, inherited: Option<TextAlign>) -> Option<TextAlign> {
    own.or(inherited)
}

/// Structured color background first, then the flat `background_color`.
/// Image and gradient backgrounds never yield a color.
pub fn background_color(section: &Section) -> Option<&str> {
    let structured = section
        .background
        .as_ref()
        .filter(|bg| matches!(bg.kind, None | Some(BackgroundKind::Color)))
        .and_then(|bg| bg.value.as_deref());
    structured.or(section.background_color.as_deref())
}

pub fn image_background(section: &Section) -> Option<&Background> {
    section
        .background
        .as_ref()
        .filter(|bg| bg.kind == Some(BackgroundKind::Image))
}

/// Overlay strength 0-100. Fractions in (0, 1) are read as proportions.
pub fn dim_ratio(background: &Background) -> u32 {
    match background.overlay_opacity {
        Some(v) if v.is_finite() && v > 0.0 && v < 1.0 => (v * 100.0).round() as u32,
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u32,
        _ => DEFAULT_DIM_RATIO,
    }
}

/// Fill missing left/right padding; present sides keep their position.
pub fn with_horizontal_defaults(mut padding: Padding, value: &str) -> Padding {
    padding.or_insert(Side::Left, value);
    padding.or_insert(Side::Right, value);
    padding
}

pub fn px(n: u32) -> String {
    format!("{}px", n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(value: serde_json::Value) -> Section {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_explicit_align_beats_archetype() {
        assert_eq!(section_align(&section(json!({"type": "hero"}))), Some(TextAlign::Center));
        assert_eq!(
            section_align(&section(json!({"type": "hero", "align": "left"}))),
            Some(TextAlign::Left)
        );
        assert_eq!(section_align(&section(json!({"type": "footer"}))), None);
        assert_eq!(item_align(Some(TextAlign::Right), Some(TextAlign::Center)), Some(TextAlign::Right));
        assert_eq!(item_align(None, Some(TextAlign::Center)), Some(TextAlign::Center));
    }

    #[test]
    fn test_structured_background_wins() {
        let s = section(json!({
            "type": "cta",
            "background": {"type": "color", "value": "#111111"},
            "background_color": "#222222"
        }));
        assert_eq!(background_color(&s), Some("#111111"));

        let s = section(json!({
            "type": "cta",
            "background": {"type": "image", "value": "hero"},
            "background_color": "#222222"
        }));
        assert_eq!(background_color(&s), Some("#222222"));
        assert!(image_background(&s).is_some());

        let s = section(json!({"type": "cta"}));
        assert_eq!(background_color(&s), None);
    }

    #[test]
    fn test_dim_ratio_scales() {
        let bg = |v: serde_json::Value| -> Background {
            serde_json::from_value(json!({"type": "image", "overlay_opacity": v})).unwrap()
        };
        assert_eq!(dim_ratio(&bg(json!(0.4))), 40);
        assert_eq!(dim_ratio(&bg(json!(55))), 55);
        assert_eq!(dim_ratio(&bg(json!(300))), 100);
        assert_eq!(dim_ratio(&bg(json!("dark"))), DEFAULT_DIM_RATIO);
    }

    #[test]
    fn test_horizontal_defaults_keep_explicit_sides() {
        let padding = with_horizontal_defaults(
            Padding::vertical("80px").with(Side::Left, "10px"),
            "40px",
        );
        let sides: Vec<_> = padding.iter().collect();
        assert_eq!(
            sides,
            vec![
                (Side::Top, "80px"),
                (Side::Bottom, "80px"),
                (Side::Left, "10px"),
                (Side::Right, "40px"),
            ]
        );
    }
}

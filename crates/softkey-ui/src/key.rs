//! Key labels and the sentinels with special meaning.

/// Non-interactive slot that only keeps the grid aligned.
pub const FILLER: &str = "";
/// The space bar; emits a literal space.
pub const SPACE: &str = " ";
/// Backspace; passed through verbatim for the receiver to interpret.
pub const BACKSPACE: &str = "⌫";
/// Glyph drawn on the space bar in place of an invisible space.
pub const SPACE_GLYPH: &str = "␣";

/// Flex weight of a normal key.
pub const KEY_WEIGHT: f32 = 1.0;
/// Flex weight of the space bar.
pub const SPACE_WEIGHT: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Filler,
    Space,
    Backspace,
    Character,
}

impl KeyKind {
    pub fn of(label: &str) -> Self {
        match label {
            FILLER => KeyKind::Filler,
            SPACE => KeyKind::Space,
            BACKSPACE => KeyKind::Backspace,
            _ => KeyKind::Character,
        }
    }

    pub fn is_interactive(self) -> bool {
        self != KeyKind::Filler
    }

    pub fn weight(self) -> f32 {
        match self {
            KeyKind::Space => SPACE_WEIGHT,
            _ => KEY_WEIGHT,
        }
    }
}

/// Text drawn on a key: the label itself except for the space bar.
pub fn display_text(label: &str) -> &str {
    match KeyKind::of(label) {
        KeyKind::Space => SPACE_GLYPH,
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_classified() {
        assert_eq!(KeyKind::of(""), KeyKind::Filler);
        assert_eq!(KeyKind::of(" "), KeyKind::Space);
        assert_eq!(KeyKind::of("⌫"), KeyKind::Backspace);
        assert_eq!(KeyKind::of("Ñ"), KeyKind::Character);
        assert_eq!(KeyKind::of("  "), KeyKind::Character);
    }

    #[test]
    fn space_gets_glyph_and_triple_weight() {
        assert_eq!(display_text(SPACE), SPACE_GLYPH);
        assert_eq!(display_text("7"), "7");
        assert_eq!(KeyKind::Space.weight(), 3.0 * KeyKind::Character.weight());
    }

    #[test]
    fn only_filler_is_inert() {
        assert!(!KeyKind::Filler.is_interactive());
        assert!(KeyKind::Backspace.is_interactive());
    }
}

//! Token color palette shared by every output format.
//!
//! The token at position `i` always gets slot `i % 8`. The terminal uses the
//! xterm 256-color index, HTML the `token-<slot>` class whose color is
//! [`PaletteEntry::hex`], and Markdown the slot's swatch glyph.

/// One palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Color name
    pub name: &'static str,
    /// xterm 256-color index
    pub ansi: u8,
    /// CSS color
    pub hex: &'static str,
    /// Glyph shown in Markdown tables
    pub swatch: &'static str,
}

/// The palette, in slot order.
pub static PALETTE: [PaletteEntry; 8] = [
    PaletteEntry {
        name: "pink",
        ansi: 205,
        hex: "#ff5faf",
        swatch: "🩷",
    },
    PaletteEntry {
        name: "purple",
        ansi: 141,
        hex: "#af87ff",
        swatch: "💜",
    },
    PaletteEntry {
        name: "cyan",
        ansi: 87,
        hex: "#5fffff",
        swatch: "🩵",
    },
    PaletteEntry {
        name: "yellow",
        ansi: 228,
        hex: "#ffff87",
        swatch: "💛",
    },
    PaletteEntry {
        name: "green",
        ansi: 118,
        hex: "#87ff00",
        swatch: "💚",
    },
    PaletteEntry {
        name: "magenta",
        ansi: 213,
        hex: "#ff87ff",
        swatch: "💗",
    },
    PaletteEntry {
        name: "light blue",
        ansi: 117,
        hex: "#87d7ff",
        swatch: "💙",
    },
    PaletteEntry {
        name: "peach",
        ansi: 223,
        hex: "#ffd7af",
        swatch: "🧡",
    },
];

/// Palette slot for the token at `index`.
#[must_use]
pub const fn slot(index: usize) -> usize {
    index % PALETTE.len()
}

/// Palette entry for the token at `index`.
#[must_use]
pub fn color(index: usize) -> &'static PaletteEntry {
    &PALETTE[slot(index)]
}

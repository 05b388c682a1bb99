//! Display labels, tooltips and colours for category codes.

pub const DEFAULT_STYLE_COLOR: &str = "#9ca3af";

const LABELS: &[(&str, &str)] = &[
    ("desconocido", "Desconocido"),
    ("entry", "Entry"),
    ("masivo", "Masivo"),
    ("medio", "Medio"),
    ("premium", "Premium"),
    ("lujo", "Lujo"),
    ("ultra_lujo", "Ultra Lujo"),
    ("mujer", "Mujer"),
    ("hombre", "Hombre"),
    ("unisex", "Unisex"),
    ("ninos", "Niños"),
    ("bebe", "Bebé"),
    ("familiar", "Familiar"),
];

const TOOLTIPS: &[(&str, &str)] = &[
    ("early_adopter", "Adopts trends ahead of most of the market"),
    ("mid_adopter", "Adopts trends once they are validated"),
    ("late_adopter", "Adopts trends in their mature phase"),
    ("selective_adopter", "Only adopts trends compatible with its DNA"),
    ("anti_trend", "Deliberately ignores or rejects trends"),
    ("dtc", "Direct-to-consumer"),
    ("wholesale", "Wholesale distribution"),
    ("marketplace_first", "Primary presence on marketplaces"),
    ("impulso", "Impulse purchase with little deliberation"),
    ("considerada", "Considered purchase, compared against alternatives"),
    ("inversion", "Purchase treated as a long-term investment"),
];

const STYLE_COLORS: &[(&str, &str)] = &[
    ("minimalista", "#6366f1"),
    ("clasico", "#8b5cf6"),
    ("contemporaneo", "#06b6d4"),
    ("streetwear", "#f59e0b"),
    ("workwear", "#84cc16"),
    ("athleisure", "#22c55e"),
    ("formal_tailoring", "#475569"),
    ("romantico", "#ec4899"),
    ("boho", "#f97316"),
    ("preppy", "#14b8a6"),
    ("avant_garde", "#ef4444"),
    ("heritage_vintage", "#a16207"),
    ("outdoor_utility", "#65a30d"),
    ("resort", "#0ea5e9"),
    ("y2k", "#d946ef"),
    ("punk_grunge", "#dc2626"),
    ("artesanal", "#b45309"),
    ("modest", "#64748b"),
    ("desconocido", DEFAULT_STYLE_COLOR),
];

/// Colours for overlaid series (radar polygons), cycled by index.
pub const SERIES_COLORS: [&str; 6] = [
    "#4f46e5", "#06b6d4", "#f59e0b", "#ef4444", "#22c55e", "#8b5cf6",
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

/// Human label for a category code.
///
/// Known codes use the curated label; anything else has underscores turned
/// into spaces and each word capitalised (`formal_tailoring` → `Formal Tailoring`).
pub fn display_label(code: &str) -> String {
    if let Some(label) = lookup(LABELS, code) {
        return label.to_string();
    }
    let mut out = String::with_capacity(code.len());
    let mut at_word_start = true;
    for ch in code.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

pub fn tooltip(code: &str) -> Option<&'static str> {
    lookup(TOOLTIPS, code)
}

pub fn style_color(style: Option<&str>) -> &'static str {
    style
        .and_then(|s| lookup(STYLE_COLORS, s))
        .unwrap_or(DEFAULT_STYLE_COLOR)
}

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

//! Emoji catalog for the note editor picker.

/// Glyph and search keywords (Spanish and English).
pub const EMOJIS: &[(&str, &str)] = &[
    ("😀", "feliz happy sonrisa"),
    ("😂", "risa llorar joy lol"),
    ("😎", "cool gafas sol"),
    ("🤔", "pensar duda thinking"),
    ("👍", "bien like ok up"),
    ("👎", "mal dislike down"),
    ("🔥", "fuego fire hot"),
    ("✨", "estrellas magia spark"),
    ("❤️", "corazon amor love"),
    ("✅", "check listo bien"),
    ("❌", "x error mal"),
    ("⚠️", "warning alerta cuidado"),
    ("📅", "calendario fecha"),
    ("🚀", "cohete rocket"),
    ("💻", "pc ordenador laptop code"),
    ("📝", "nota escribir memo"),
    ("📌", "pin fijar"),
    ("🔗", "link enlace cadena"),
    ("🐍", "python serpiente"),
];

/// Entries whose glyph or keywords contain `query`, case-insensitively.
pub fn search(query: &str) -> Vec<(&'static str, &'static str)> {
    let needle = query.trim().to_lowercase();
    EMOJIS
        .iter()
        .copied()
        .filter(|(glyph, keywords)| {
            needle.is_empty() || keywords.contains(&needle) || glyph.contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{search, EMOJIS};

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(search("  ").len(), EMOJIS.len());
    }

    #[test]
    fn keyword_search_is_case_insensitive() {
        let hits = search("FIRE");
        assert_eq!(hits, vec![("🔥", "fuego fire hot")]);
    }
}

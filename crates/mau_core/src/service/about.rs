//! Static "About" panel content.

pub const APP_NAME: &str = "GNU Mau";
pub const TAGLINE: &str = "Modular Application Utility";
pub const LICENSE: &str = "GPL V3";
pub const COPYRIGHT: &str = "Copyright © 2024 Ronal Forero. Licensed under GPL v3.";

/// Credits shown below the description, in display order.
pub const CREDITS: [(&str, &str); 5] = [
    ("packaged", "Ronal Forero"),
    ("translated", "Ronal Forero"),
    ("tested", "Kelly Gomez"),
    ("designer", "Ronal Forero"),
    ("development by", "Ronal Forero"),
];

/// `v<crate version> Alpha`.
pub fn version_label() -> String {
    format!("v{} Alpha", env!("CARGO_PKG_VERSION"))
}

/// Plain-text rendering of the panel.
pub fn about_text() -> String {
    let mut lines = vec![
        format!("{APP_NAME}, the {TAGLINE}"),
        format!("version: {}", version_label()),
        format!("license: {LICENSE}"),
    ];
    lines.extend(CREDITS.iter().map(|(title, value)| format!("{title}: {value}")));
    lines.push(COPYRIGHT.to_string());
    lines.join("\n")
}

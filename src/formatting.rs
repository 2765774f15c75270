use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub identifier: (u8, u8, u8), // IDs, muted text
    pub header: (u8, u8, u8),     // Section headers
    pub ok: (u8, u8, u8),
    pub warn: (u8, u8, u8),
    pub fail: (u8, u8, u8),
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        identifier: (108, 112, 134), // Gray
        header: (148, 226, 213),     // Teal
        ok: (166, 227, 161),         // Green
        warn: (249, 226, 175),       // Yellow
        fail: (243, 139, 168),       // Red
    };
}

/// Formatting context passed through rendering pipeline
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env() -> Self {
        Self::new(crate::config::color_enabled())
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8), bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let painted = text.rgb(r, g, b);
        if bold { painted.bold().to_string() } else { painted.to_string() }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.identifier, false)
    }

    pub fn format_header(&self, text: &str) -> String {
        self.paint(text, self.palette.header, true)
    }

    pub fn format_tag(&self, tag: &str) -> String {
        self.paint(tag, color_for_tag(tag), true)
    }

    pub fn format_tags(&self, tags: &[String]) -> String {
        tags.iter().map(|t| self.format_tag(t)).collect::<Vec<_>>().join(" ")
    }

    pub fn ok_mark(&self) -> String {
        self.paint("✓", self.palette.ok, true)
    }

    pub fn warn_mark(&self) -> String {
        self.paint("⚠", self.palette.warn, true)
    }

    pub fn fail_mark(&self) -> String {
        self.paint("✗", self.palette.fail, true)
    }
}

/// Hash a tag for deterministic color selection
pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (255, 169, 167),
        (148, 226, 213),
        (198, 160, 246),
        (240, 198, 198),
        (181, 232, 224),
        (183, 189, 248),
        (255, 214, 165),
        (196, 181, 255),
    ];
    PALETTE[(hash_tag(tag) as usize) % PALETTE.len()]
}

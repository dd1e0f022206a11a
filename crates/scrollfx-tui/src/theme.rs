use ratatui::style::Color;

/// Gruvbox Material (dark, medium) palette
pub struct GruvboxMaterial;

impl GruvboxMaterial {
    pub const BG0: Color = Color::Rgb(0x28, 0x28, 0x28);
    pub const BG1: Color = Color::Rgb(0x32, 0x30, 0x2f);
    pub const BG2: Color = Color::Rgb(0x45, 0x40, 0x3d);
    pub const FG0: Color = Color::Rgb(0xd4, 0xbe, 0x98);
    pub const GREY0: Color = Color::Rgb(0x7c, 0x6f, 0x64);
    pub const GREY1: Color = Color::Rgb(0x92, 0x83, 0x74);
    pub const GREY2: Color = Color::Rgb(0xa8, 0x99, 0x84);
    pub const RED: Color = Color::Rgb(0xea, 0x69, 0x62);
    pub const ORANGE: Color = Color::Rgb(0xe7, 0x8a, 0x4e);
    pub const YELLOW: Color = Color::Rgb(0xd8, 0xa6, 0x57);
    pub const GREEN: Color = Color::Rgb(0xa9, 0xb6, 0x65);
    pub const AQUA: Color = Color::Rgb(0x89, 0xb4, 0x82);
    pub const BLUE: Color = Color::Rgb(0x7d, 0xae, 0xa3);
    pub const PURPLE: Color = Color::Rgb(0xd3, 0x86, 0x9b);

    pub const ACCENT: Color = Self::AQUA;
    pub const SELECTION: Color = Self::BG2;
}

/// Blend `color` towards the background by `opacity` (0 = background)
pub fn fade(color: Color, opacity: f64) -> Color {
    let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, GruvboxMaterial::BG0) else {
        return color;
    };
    let t = opacity.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * t).round() as u8;
    Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
}

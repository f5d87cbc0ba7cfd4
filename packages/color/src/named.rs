//! Named colour table.
//!
//! Covers the CSS4 colour keywords, the single-letter base colours used by
//! plotting libraries (`b`, `g`, `r`, ...) and the `tab:` Tableau names.
//! Lookup is case-insensitive.

use crate::Rgb;

const fn hex(value: u32) -> Rgb {
    Rgb::from_u32(value)
}

/// Single-letter base colours. Channels that are fractional in their
/// canonical definition (`0.5`, `0.75`) are truncated to 8 bits.
const BASE: &[(&str, Rgb)] = &[
    ("b", Rgb::new(0, 0, 255)),
    ("g", Rgb::new(0, 127, 0)),
    ("r", Rgb::new(255, 0, 0)),
    ("c", Rgb::new(0, 191, 191)),
    ("m", Rgb::new(191, 0, 191)),
    ("y", Rgb::new(191, 191, 0)),
    ("k", Rgb::new(0, 0, 0)),
    ("w", Rgb::new(255, 255, 255)),
];

/// Tableau palette (identical to Category10).
const TABLEAU: &[(&str, Rgb)] = &[
    ("tab:blue", hex(0x001f_77b4)),
    ("tab:orange", hex(0x00ff_7f0e)),
    ("tab:green", hex(0x002c_a02c)),
    ("tab:red", hex(0x00d6_2728)),
    ("tab:purple", hex(0x0094_67bd)),
    ("tab:brown", hex(0x008c_564b)),
    ("tab:pink", hex(0x00e3_77c2)),
    ("tab:gray", hex(0x007f_7f7f)),
    ("tab:grey", hex(0x007f_7f7f)),
    ("tab:olive", hex(0x00bc_bd22)),
    ("tab:cyan", hex(0x0017_becf)),
];

const CSS4: &[(&str, Rgb)] = &[
    ("aliceblue", hex(0x00f0_f8ff)),
    ("antiquewhite", hex(0x00fa_ebd7)),
    ("aqua", hex(0x0000_ffff)),
    ("aquamarine", hex(0x007f_ffd4)),
    ("azure", hex(0x00f0_ffff)),
    ("beige", hex(0x00f5_f5dc)),
    ("bisque", hex(0x00ff_e4c4)),
    ("black", hex(0x0000_0000)),
    ("blanchedalmond", hex(0x00ff_ebcd)),
    ("blue", hex(0x0000_00ff)),
    ("blueviolet", hex(0x008a_2be2)),
    ("brown", hex(0x00a5_2a2a)),
    ("burlywood", hex(0x00de_b887)),
    ("cadetblue", hex(0x005f_9ea0)),
    ("chartreuse", hex(0x007f_ff00)),
    ("chocolate", hex(0x00d2_691e)),
    ("coral", hex(0x00ff_7f50)),
    ("cornflowerblue", hex(0x0064_95ed)),
    ("cornsilk", hex(0x00ff_f8dc)),
    ("crimson", hex(0x00dc_143c)),
    ("cyan", hex(0x0000_ffff)),
    ("darkblue", hex(0x0000_008b)),
    ("darkcyan", hex(0x0000_8b8b)),
    ("darkgoldenrod", hex(0x00b8_860b)),
    ("darkgray", hex(0x00a9_a9a9)),
    ("darkgreen", hex(0x0000_6400)),
    ("darkgrey", hex(0x00a9_a9a9)),
    ("darkkhaki", hex(0x00bd_b76b)),
    ("darkmagenta", hex(0x008b_008b)),
    ("darkolivegreen", hex(0x0055_6b2f)),
    ("darkorange", hex(0x00ff_8c00)),
    ("darkorchid", hex(0x0099_32cc)),
    ("darkred", hex(0x008b_0000)),
    ("darksalmon", hex(0x00e9_967a)),
    ("darkseagreen", hex(0x008f_bc8f)),
    ("darkslateblue", hex(0x0048_3d8b)),
    ("darkslategray", hex(0x002f_4f4f)),
    ("darkslategrey", hex(0x002f_4f4f)),
    ("darkturquoise", hex(0x0000_ced1)),
    ("darkviolet", hex(0x0094_00d3)),
    ("deeppink", hex(0x00ff_1493)),
    ("deepskyblue", hex(0x0000_bfff)),
    ("dimgray", hex(0x0069_6969)),
    ("dimgrey", hex(0x0069_6969)),
    ("dodgerblue", hex(0x001e_90ff)),
    ("firebrick", hex(0x00b2_2222)),
    ("floralwhite", hex(0x00ff_faf0)),
    ("forestgreen", hex(0x0022_8b22)),
    ("fuchsia", hex(0x00ff_00ff)),
    ("gainsboro", hex(0x00dc_dcdc)),
    ("ghostwhite", hex(0x00f8_f8ff)),
    ("gold", hex(0x00ff_d700)),
    ("goldenrod", hex(0x00da_a520)),
    ("gray", hex(0x0080_8080)),
    ("green", hex(0x0000_8000)),
    ("greenyellow", hex(0x00ad_ff2f)),
    ("grey", hex(0x0080_8080)),
    ("honeydew", hex(0x00f0_fff0)),
    ("hotpink", hex(0x00ff_69b4)),
    ("indianred", hex(0x00cd_5c5c)),
    ("indigo", hex(0x004b_0082)),
    ("ivory", hex(0x00ff_fff0)),
    ("khaki", hex(0x00f0_e68c)),
    ("lavender", hex(0x00e6_e6fa)),
    ("lavenderblush", hex(0x00ff_f0f5)),
    ("lawngreen", hex(0x007c_fc00)),
    ("lemonchiffon", hex(0x00ff_facd)),
    ("lightblue", hex(0x00ad_d8e6)),
    ("lightcoral", hex(0x00f0_8080)),
    ("lightcyan", hex(0x00e0_ffff)),
    ("lightgoldenrodyellow", hex(0x00fa_fad2)),
    ("lightgray", hex(0x00d3_d3d3)),
    ("lightgreen", hex(0x0090_ee90)),
    ("lightgrey", hex(0x00d3_d3d3)),
    ("lightpink", hex(0x00ff_b6c1)),
    ("lightsalmon", hex(0x00ff_a07a)),
    ("lightseagreen", hex(0x0020_b2aa)),
    ("lightskyblue", hex(0x0087_cefa)),
    ("lightslategray", hex(0x0077_8899)),
    ("lightslategrey", hex(0x0077_8899)),
    ("lightsteelblue", hex(0x00b0_c4de)),
    ("lightyellow", hex(0x00ff_ffe0)),
    ("lime", hex(0x0000_ff00)),
    ("limegreen", hex(0x0032_cd32)),
    ("linen", hex(0x00fa_f0e6)),
    ("magenta", hex(0x00ff_00ff)),
    ("maroon", hex(0x0080_0000)),
    ("mediumaquamarine", hex(0x0066_cdaa)),
    ("mediumblue", hex(0x0000_00cd)),
    ("mediumorchid", hex(0x00ba_55d3)),
    ("mediumpurple", hex(0x0093_70db)),
    ("mediumseagreen", hex(0x003c_b371)),
    ("mediumslateblue", hex(0x007b_68ee)),
    ("mediumspringgreen", hex(0x0000_fa9a)),
    ("mediumturquoise", hex(0x0048_d1cc)),
    ("mediumvioletred", hex(0x00c7_1585)),
    ("midnightblue", hex(0x0019_1970)),
    ("mintcream", hex(0x00f5_fffa)),
    ("mistyrose", hex(0x00ff_e4e1)),
    ("moccasin", hex(0x00ff_e4b5)),
    ("navajowhite", hex(0x00ff_dead)),
    ("navy", hex(0x0000_0080)),
    ("oldlace", hex(0x00fd_f5e6)),
    ("olive", hex(0x0080_8000)),
    ("olivedrab", hex(0x006b_8e23)),
    ("orange", hex(0x00ff_a500)),
    ("orangered", hex(0x00ff_4500)),
    ("orchid", hex(0x00da_70d6)),
    ("palegoldenrod", hex(0x00ee_e8aa)),
    ("palegreen", hex(0x0098_fb98)),
    ("paleturquoise", hex(0x00af_eeee)),
    ("palevioletred", hex(0x00db_7093)),
    ("papayawhip", hex(0x00ff_efd5)),
    ("peachpuff", hex(0x00ff_dab9)),
    ("peru", hex(0x00cd_853f)),
    ("pink", hex(0x00ff_c0cb)),
    ("plum", hex(0x00dd_a0dd)),
    ("powderblue", hex(0x00b0_e0e6)),
    ("purple", hex(0x0080_0080)),
    ("rebeccapurple", hex(0x0066_3399)),
    ("red", hex(0x00ff_0000)),
    ("rosybrown", hex(0x00bc_8f8f)),
    ("royalblue", hex(0x0041_69e1)),
    ("saddlebrown", hex(0x008b_4513)),
    ("salmon", hex(0x00fa_8072)),
    ("sandybrown", hex(0x00f4_a460)),
    ("seagreen", hex(0x002e_8b57)),
    ("seashell", hex(0x00ff_f5ee)),
    ("sienna", hex(0x00a0_522d)),
    ("silver", hex(0x00c0_c0c0)),
    ("skyblue", hex(0x0087_ceeb)),
    ("slateblue", hex(0x006a_5acd)),
    ("slategray", hex(0x0070_8090)),
    ("slategrey", hex(0x0070_8090)),
    ("snow", hex(0x00ff_fafa)),
    ("springgreen", hex(0x0000_ff7f)),
    ("steelblue", hex(0x0046_82b4)),
    ("tan", hex(0x00d2_b48c)),
    ("teal", hex(0x0000_8080)),
    ("thistle", hex(0x00d8_bfd8)),
    ("tomato", hex(0x00ff_6347)),
    ("turquoise", hex(0x0040_e0d0)),
    ("violet", hex(0x00ee_82ee)),
    ("wheat", hex(0x00f5_deb3)),
    ("white", hex(0x00ff_ffff)),
    ("whitesmoke", hex(0x00f5_f5f5)),
    ("yellow", hex(0x00ff_ff00)),
    ("yellowgreen", hex(0x009a_cd32)),
];

/// Looks up a colour by name, ignoring ASCII case and surrounding
/// whitespace.
#[must_use]
pub fn lookup(name: &str) -> Option<Rgb> {
    let key = name.trim().to_ascii_lowercase();

    BASE.iter()
        .chain(TABLEAU)
        .chain(CSS4)
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, rgb)| *rgb)
}

/// Number of distinct names known to [`lookup`].
#[must_use]
pub const fn known_names() -> usize {
    BASE.len() + TABLEAU.len() + CSS4.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_css_names_case_insensitively() {
        assert_eq!(lookup("Red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(lookup("  SIENNA "), Some(Rgb::new(160, 82, 45)));
        assert_eq!(lookup("gold"), Some(Rgb::new(255, 215, 0)));
        assert_eq!(lookup("silver"), Some(Rgb::new(192, 192, 192)));
    }

    #[test]
    fn looks_up_base_and_tableau_names() {
        assert_eq!(lookup("k"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(lookup("g"), Some(Rgb::new(0, 127, 0)));
        assert_eq!(lookup("tab:orange"), Some(Rgb::new(255, 127, 14)));
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(lookup("not-a-colour").is_none());
    }

    #[test]
    fn css_table_is_complete() {
        assert_eq!(CSS4.len(), 148);
        assert_eq!(known_names(), 148 + 11 + 8);
    }
}

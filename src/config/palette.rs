// ==========================================
// 状态分布驾驶舱 - 状态配色表
// ==========================================
// 职责: 类别名 → 颜色 的静态映射
// 红线: 未知类别一律回退到默认色，查询永不失败
// ==========================================

use crate::config::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ==========================================
// HexColor - #RRGGBB 颜色
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ===== 预置颜色 =====
pub const GOLDENROD: HexColor = HexColor::new(0xDA, 0xA5, 0x20);
pub const MEDIUM_AQUAMARINE: HexColor = HexColor::new(0x66, 0xCD, 0xAA);
pub const PLUM: HexColor = HexColor::new(0xDD, 0xA0, 0xDD);
pub const LIGHT_GREY: HexColor = HexColor::new(0xD3, 0xD3, 0xD3);

/// 内置状态配色
pub const DEFAULT_STATUS_COLORS: [(&str, HexColor); 3] = [
    ("COMPILADO", GOLDENROD),
    ("PENDIENTE", MEDIUM_AQUAMARINE),
    ("YA NO SE UTILIZA", PLUM),
];

// ==========================================
// ColorPalette - 配色表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// 未登记类别的回退色
    #[serde(default = "default_color")]
    pub default: HexColor,

    /// 类别名 → 颜色（配置文件中的条目覆盖或追加到内置值）
    #[serde(default = "default_colors", deserialize_with = "merge_with_default_colors")]
    pub colors: BTreeMap<String, HexColor>,
}

fn default_color() -> HexColor {
    LIGHT_GREY
}

fn default_colors() -> BTreeMap<String, HexColor> {
    DEFAULT_STATUS_COLORS
        .iter()
        .map(|(name, color)| (name.to_string(), *color))
        .collect()
}

fn merge_with_default_colors<'de, D>(deserializer: D) -> Result<BTreeMap<String, HexColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let configured = BTreeMap::<String, HexColor>::deserialize(deserializer)?;
    let mut colors = default_colors();
    colors.extend(configured);
    Ok(colors)
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            default: default_color(),
            colors: default_colors(),
        }
    }
}

impl ColorPalette {
    /// 查询类别颜色（未登记返回默认色）
    pub fn color_for(&self, category: &str) -> HexColor {
        self.colors.get(category).copied().unwrap_or(self.default)
    }

    /// 是否登记了该类别
    pub fn is_known(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_fallback_colors() {
        let palette = ColorPalette::default();
        assert_eq!(palette.color_for("COMPILADO"), GOLDENROD);
        assert_eq!(palette.color_for("YA NO SE UTILIZA"), PLUM);
        assert_eq!(palette.color_for("EN PROCESO"), LIGHT_GREY);
        assert!(!palette.is_known("EN PROCESO"));
    }

    #[test]
    fn test_hex_color_parse_and_display() {
        let c: HexColor = "#daa520".parse().unwrap();
        assert_eq!(c, GOLDENROD);
        assert_eq!(c.to_string(), "#DAA520");
    }

    #[test]
    fn test_hex_color_rejects_invalid() {
        assert!("DAA520".parse::<HexColor>().is_err());
        assert!("#DAA52".parse::<HexColor>().is_err());
        assert!("#GGGGGG".parse::<HexColor>().is_err());
        assert!("#ÄÄÄ".parse::<HexColor>().is_err());
    }
}

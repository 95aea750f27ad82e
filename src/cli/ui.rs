use crate::core::valuation::round_money;
use rust_decimal::Decimal;

pub const GREEN: &str = "\u{1b}[32;1m";
pub const RED: &str = "\u{1b}[31m";
pub const RESET: &str = "\u{1b}[0m";

/// Padding added to the longest title of top-level and group tables.
pub const TABLE_PADDING: usize = 3;
/// Padding added to the longest label of per-holding submenu tables.
pub const SUBMENU_PADDING: usize = 5;

const VALUE_WIDTH: usize = 10;
const DELTA_WIDTH: usize = 7;

/// How a single number is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberStyle {
    pub colorize: bool,
    pub force_sign: bool,
}

impl NumberStyle {
    /// Unsigned and uncolored, for absolute values.
    pub const PLAIN: NumberStyle = NumberStyle {
        colorize: false,
        force_sign: false,
    };
    /// Signed but uncolored.
    pub const SIGNED: NumberStyle = NumberStyle {
        colorize: false,
        force_sign: true,
    };
    /// Signed and colored, for deltas.
    pub const DELTA: NumberStyle = NumberStyle {
        colorize: true,
        force_sign: true,
    };
}

/// Formats a monetary value with exactly two fractional digits.
pub fn format_number(value: Decimal, style: NumberStyle) -> String {
    let rounded = round_money(value);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };

    let sign = if style.force_sign && rounded > Decimal::ZERO {
        "+"
    } else {
        ""
    };
    let text = format!("{sign}{rounded:.2}");

    if !style.colorize {
        return text;
    }
    let color = if rounded > Decimal::ZERO { GREEN } else { RED };
    format!("{color}{text}{RESET}")
}

/// Formats a value as-is, without padding the fraction or adding a sign.
/// Whole numbers keep a single fractional digit, like a printed float.
pub fn format_raw(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

/// Line prefix encoding the nesting depth of a row.
pub fn depth_prefix(depth: usize) -> String {
    "--".repeat(depth)
}

/// Separator line at the given depth.
pub fn separator(depth: usize) -> String {
    format!("{}---", depth_prefix(depth))
}

/// Column layout of one table. The title column is sized from the longest
/// title in that table, so alignment is local to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    title_width: usize,
}

impl TableLayout {
    pub fn new<'a>(titles: impl IntoIterator<Item = &'a str>, padding: usize) -> Self {
        let longest = titles
            .into_iter()
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0);
        TableLayout {
            title_width: longest + padding,
        }
    }

    pub fn title_width(&self) -> usize {
        self.title_width
    }

    /// Formats one row: title, value and delta columns followed by the directive.
    pub fn row(&self, title: &str, value: &str, delta: &str, directive: &str) -> String {
        format!(
            "{title:<title_width$} {value:<value_width$} {delta:<delta_width$} {directive}",
            title_width = self.title_width,
            value_width = VALUE_WIDTH,
            delta_width = DELTA_WIDTH,
        )
    }
}

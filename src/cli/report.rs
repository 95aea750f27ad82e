//! Renders the valuated portfolio as menu lines for xbar/BitBar style hosts.
//!
//! Every row ends with the display directive, nesting is encoded with `--`
//! prefixes and each table aligns its columns independently.
use super::ui::{
    NumberStyle, SUBMENU_PADDING, TABLE_PADDING, TableLayout, depth_prefix, format_number,
    format_raw, separator,
};
use crate::core::{AssetGroup, HoldingValuation, PortfolioTotals};
use rust_decimal::Decimal;

/// Display settings shared by all rows of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    pub font: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        ReportStyle {
            font: "Menlo".to_string(),
        }
    }
}

impl ReportStyle {
    pub fn new(font: &str) -> Self {
        ReportStyle {
            font: font.to_string(),
        }
    }

    pub fn directive(&self) -> String {
        format!("| font='{}'", self.font)
    }
}

/// Stable sort, largest first.
fn sorted_desc<T>(items: &[T], key: impl Fn(&T) -> Decimal) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted
}

pub fn render(
    portfolio: &PortfolioTotals,
    groups: &[AssetGroup],
    watchlist: &AssetGroup,
    style: &ReportStyle,
) -> Vec<String> {
    let directive = style.directive();
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {directive}",
        format_number(portfolio.total_profit, NumberStyle::SIGNED)
    ));
    lines.push(separator(0));

    let top = TableLayout::new(groups.iter().map(|g| g.title.as_str()), TABLE_PADDING);
    lines.push(top.row("Title", "Value", "Profit", &directive));

    for group in sorted_desc(groups, |g| g.totals.market_value) {
        render_group(&mut lines, &top, group, &directive);
    }

    lines.push(separator(0));
    lines.push(top.row(
        "Change Today:",
        "",
        &format_number(portfolio.total_change_today, NumberStyle::DELTA),
        &directive,
    ));
    lines.push(top.row(
        "Total",
        &format_number(portfolio.total_value, NumberStyle::PLAIN),
        &format_number(portfolio.total_profit, NumberStyle::DELTA),
        &directive,
    ));
    if let Some(dividend) = portfolio.total_annual_dividend {
        lines.push(top.row(
            "Annual Dividends:",
            "",
            &format_number(dividend, NumberStyle::PLAIN),
            &directive,
        ));
    }

    if !watchlist.holdings.is_empty() {
        lines.push(separator(0));
        render_watchlist(&mut lines, watchlist, &directive);
    }

    lines
}

fn render_group(
    lines: &mut Vec<String>,
    top: &TableLayout,
    group: &AssetGroup,
    directive: &str,
) {
    let totals = &group.totals;
    lines.push(top.row(
        &group.title,
        &format_number(totals.market_value, NumberStyle::PLAIN),
        &format_number(totals.profit, NumberStyle::SIGNED),
        directive,
    ));

    let prefix = depth_prefix(1);
    let table = TableLayout::new(group.holdings.iter().map(|h| h.title.as_str()), TABLE_PADDING);

    lines.push(format!(
        "{prefix}{}",
        table.row(
            "Change Today:",
            "",
            &format_number(totals.change_today, NumberStyle::DELTA),
            directive,
        )
    ));
    lines.push(format!(
        "{prefix}{}",
        table.row(
            "Change Total:",
            "",
            &format_number(totals.profit, NumberStyle::DELTA),
            directive,
        )
    ));
    if let Some(dividend) = totals.annual_dividend {
        lines.push(format!(
            "{prefix}{}",
            table.row(
                "Annual Dividends:",
                "",
                &format_number(dividend, NumberStyle::PLAIN),
                directive,
            )
        ));
    }
    lines.push(separator(1));

    for holding in sorted_desc(&group.holdings, |h| h.market_value) {
        let profit = holding
            .profit
            .map(|p| format_number(p, NumberStyle::DELTA))
            .unwrap_or_default();
        lines.push(format!(
            "{prefix}{}",
            table.row(
                &holding.title,
                &format_number(holding.market_value, NumberStyle::PLAIN),
                &profit,
                directive,
            )
        ));
        render_dividend(lines, holding, directive);
    }
}

/// Submenu under a holding row, only for holdings with dividend data.
fn render_dividend(lines: &mut Vec<String>, holding: &HoldingValuation, directive: &str) {
    let Some(dividend) = &holding.dividend else {
        return;
    };

    let mut rows = vec![
        (
            "Annual Dividend:",
            format_number(dividend.my_annual, NumberStyle::PLAIN),
        ),
        (
            "Dividend/Unit:",
            format_number(dividend.annual_per_unit, NumberStyle::PLAIN),
        ),
    ];
    if let Some(yield_percent) = dividend.yield_percent {
        rows.push((
            "Dividend Yield:",
            format!("{}%", format_number(yield_percent, NumberStyle::PLAIN)),
        ));
    }

    let prefix = depth_prefix(2);
    let table = TableLayout::new(rows.iter().map(|(label, _)| *label), SUBMENU_PADDING);
    for (label, value) in &rows {
        lines.push(format!("{prefix}{}", table.row(label, value, "", directive)));
    }
}

fn render_watchlist(lines: &mut Vec<String>, watchlist: &AssetGroup, directive: &str) {
    lines.push(format!("{}{directive}", watchlist.title));

    let prefix = depth_prefix(1);
    let table = TableLayout::new(
        watchlist.holdings.iter().map(|h| h.title.as_str()),
        TABLE_PADDING,
    );
    for watched in sorted_desc(&watchlist.holdings, |h| h.current_price) {
        lines.push(format!(
            "{prefix}{}",
            table.row(&watched.title, "", &format_raw(watched.current_price), directive)
        ));
    }
}

/// Joins report lines the way they are written to stdout.
pub fn to_output(lines: &[String]) -> String {
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregation::aggregate_portfolio;
    use crate::core::quote::Quote;
    use crate::core::valuation::{Holding, valuate};
    use rust_decimal_macros::dec;

    const GREEN: &str = "\u{1b}[32;1m";
    const RED: &str = "\u{1b}[31m";
    const RESET: &str = "\u{1b}[0m";

    fn quote(symbol: &str, price: Decimal, open: Decimal) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            regular_market_price: Some(price),
            regular_market_open: Some(open),
            ..Default::default()
        }
    }

    fn owned(
        symbol: &str,
        amount: Decimal,
        cost: Decimal,
        price: Decimal,
        open: Decimal,
    ) -> HoldingValuation {
        valuate(
            &Holding::owned(symbol, amount, Some(cost)).with_title(symbol),
            &quote(symbol, price, open),
        )
        .unwrap()
    }

    fn stocks() -> AssetGroup {
        AssetGroup::new(
            "Stocks",
            vec![
                owned("AAA", dec!(10), dec!(5), dec!(6), dec!(5.5)),
                owned("BBB", dec!(2), dec!(100), dec!(90), dec!(95)),
            ],
        )
    }

    fn watchlist() -> AssetGroup {
        let watched = valuate(
            &Holding::watched("CCC").with_title("CCC"),
            &quote("CCC", dec!(42.5), dec!(41)),
        )
        .unwrap();
        AssetGroup::new("Watchlist", vec![watched])
    }

    #[test]
    fn test_render_full_report() {
        let groups = vec![stocks()];
        let totals: Vec<_> = groups.iter().map(|g| g.totals.clone()).collect();
        let portfolio = aggregate_portfolio(&totals);

        let lines = render(&portfolio, &groups, &watchlist(), &ReportStyle::default());

        let expected = vec![
            "-10.00 | font='Menlo'".to_string(),
            "---".to_string(),
            "Title     Value      Profit  | font='Menlo'".to_string(),
            "Stocks    240.00     -10.00  | font='Menlo'".to_string(),
            "--Change Today:            \u{1b}[31m-5.00\u{1b}[0m | font='Menlo'".to_string(),
            "--Change Total:            \u{1b}[31m-10.00\u{1b}[0m | font='Menlo'".to_string(),
            "-----".to_string(),
            format!("--BBB    180.00     {RED}-20.00{RESET} | font='Menlo'"),
            format!("--AAA    60.00      {GREEN}+10.00{RESET} | font='Menlo'"),
            "---".to_string(),
            format!("Change Today:            {RED}-5.00{RESET} | font='Menlo'"),
            format!("Total     240.00     {RED}-10.00{RESET} | font='Menlo'"),
            "---".to_string(),
            "Watchlist| font='Menlo'".to_string(),
            "--CCC               42.5    | font='Menlo'".to_string(),
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_every_row_carries_directive() {
        let groups = vec![stocks()];
        let portfolio = aggregate_portfolio(&[groups[0].totals.clone()]);
        let style = ReportStyle::new("Monaco");
        let lines = render(&portfolio, &groups, &watchlist(), &style);

        for line in lines.iter().filter(|l| !l.trim_start_matches('-').is_empty()) {
            assert!(line.ends_with("| font='Monaco'"), "missing directive: {line}");
        }
    }

    #[test]
    fn test_groups_sorted_by_value_descending() {
        let small = AssetGroup::new(
            "Small",
            vec![owned("S", dec!(1), dec!(1), dec!(1), dec!(1))],
        );
        let tie = AssetGroup::new(
            "Tie",
            vec![owned("T", dec!(1), dec!(1), dec!(1), dec!(1))],
        );
        let groups = vec![small, stocks(), tie];
        let totals: Vec<_> = groups.iter().map(|g| g.totals.clone()).collect();
        let portfolio = aggregate_portfolio(&totals);
        let empty_watchlist = AssetGroup::new("Watchlist", Vec::new());

        let lines = render(&portfolio, &groups, &empty_watchlist, &ReportStyle::default());
        let group_rows: Vec<&String> = lines
            .iter()
            .filter(|l| ["Small", "Stocks", "Tie"].iter().any(|t| l.starts_with(t)))
            .collect();

        assert_eq!(group_rows.len(), 3);
        assert!(group_rows[0].starts_with("Stocks"));
        // equal values keep their input order
        assert!(group_rows[1].starts_with("Small"));
        assert!(group_rows[2].starts_with("Tie"));
        assert!(!lines.iter().any(|l| l.starts_with("Watchlist")));
    }

    #[test]
    fn test_dividend_lines() {
        let mut q = quote("KO", dec!(60), dec!(59));
        q.trailing_annual_dividend_rate = Some(dec!(1.94));
        q.trailing_annual_dividend_yield = Some(dec!(0.0323));
        let ko = valuate(
            &Holding::owned("KO", dec!(15), Some(dec!(50))).with_title("Coca-Cola"),
            &q,
        )
        .unwrap();
        let groups = vec![AssetGroup::new("Dividends", vec![ko])];
        let portfolio = aggregate_portfolio(&[groups[0].totals.clone()]);

        let lines = render(
            &portfolio,
            &groups,
            &AssetGroup::new("Watchlist", Vec::new()),
            &ReportStyle::default(),
        );

        let expected = [
            "--Annual Dividends:            29.10   | font='Menlo'",
            "----Annual Dividend:      29.10              | font='Menlo'",
            "----Dividend/Unit:        1.94               | font='Menlo'",
            "----Dividend Yield:       3.23%              | font='Menlo'",
            "Annual Dividends:            29.10   | font='Menlo'",
        ];
        for line in expected {
            assert!(lines.iter().any(|l| l == line), "missing line: {line}");
        }
    }

    #[test]
    fn test_no_dividend_lines_without_dividend_data() {
        let groups = vec![stocks()];
        let portfolio = aggregate_portfolio(&[groups[0].totals.clone()]);
        let lines = render(&portfolio, &groups, &watchlist(), &ReportStyle::default());

        assert!(!lines.iter().any(|l| l.contains("Dividend")));
        // depth-2 rows only come from dividend sub-tables
        let submenu = depth_prefix(2);
        assert!(!lines.iter().any(|l| {
            l.strip_prefix(&submenu)
                .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('-'))
        }));
        assert!(lines.iter().any(|l| l == "-----"));
    }

    #[test]
    fn test_equal_holdings_keep_input_order() {
        let group = AssetGroup::new(
            "Stocks",
            vec![
                owned("LOW", dec!(1), dec!(1), dec!(5), dec!(5)),
                owned("FIRST", dec!(2), dec!(1), dec!(10), dec!(10)),
                owned("SECOND", dec!(4), dec!(1), dec!(5), dec!(5)),
                owned("THIRD", dec!(1), dec!(1), dec!(20), dec!(20)),
            ],
        );
        let groups = vec![group];
        let portfolio = aggregate_portfolio(&[groups[0].totals.clone()]);
        let empty_watchlist = AssetGroup::new("Watchlist", Vec::new());

        let lines = render(&portfolio, &groups, &empty_watchlist, &ReportStyle::default());
        let holding_rows: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.strip_prefix("--"))
            .filter_map(|rest| rest.split_whitespace().next())
            .filter(|title| ["LOW", "FIRST", "SECOND", "THIRD"].contains(title))
            .collect();

        assert_eq!(holding_rows, vec!["FIRST", "SECOND", "THIRD", "LOW"]);
    }

    #[test]
    fn test_to_output() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(to_output(&lines), "a\nb\n");
    }
}

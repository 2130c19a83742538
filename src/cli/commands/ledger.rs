use colored::Colorize;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::chart::{bar, monthly_bars};
use crate::cli::ui::formatting::{format_money, format_percent};
use crate::cli::ui::table::{Table, TableColumn};
use crate::core::services::{SummaryService, TransactionService};
use crate::domain::{Category, Month, RecordRequest, SourceType, Transaction};
use crate::errors::LedgerError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "record",
            "Record an entry for a month",
            "record <category> <month 1-12|name> <amount> [subcategory]",
            cmd_record,
        ),
        CommandEntry::new(
            "total",
            "Show a category's annual total",
            "total <category>",
            cmd_total,
        ),
        CommandEntry::new(
            "chart",
            "Chart a category across the year",
            "chart <category>",
            cmd_chart,
        ),
        CommandEntry::new(
            "overview",
            "Chart all categories per month",
            "overview",
            cmd_overview,
        ),
        CommandEntry::new(
            "history",
            "List recorded transactions",
            "history",
            cmd_history,
        ),
    ]
}

/// Amount policy of the entry form: a positive, finite number.
pub(crate) fn parse_amount(token: &str) -> Result<f64, CommandError> {
    match token.trim().replace(',', ".").parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{token}` is not a valid amount; enter a positive number"
        ))),
    }
}

fn parse_category(token: &str) -> Result<Category, CommandError> {
    Category::parse(token).map_err(invalid_arguments)
}

fn invalid_arguments(err: LedgerError) -> CommandError {
    CommandError::InvalidArguments(err.to_string())
}

fn cmd_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (category, month, amount, subcategory) = match args {
        [category, month, amount] => (*category, *month, *amount, None),
        [category, month, amount, sub] => (*category, *month, *amount, Some(*sub)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: record <category> <month> <amount> [subcategory]".into(),
            ))
        }
    };
    let month = Month::parse_label(month).map_err(invalid_arguments)?;
    let amount = parse_amount(amount)?;

    let mut request = RecordRequest::new(category, category, i64::from(month), amount);
    if let Some(sub) = subcategory {
        request = request.with_subcategory(sub);
    }

    let outcome = TransactionService::record(&mut context.ledger, &request)?;
    let symbol = &context.config.currency_symbol;
    output::success(format!(
        "Added {} to {} for {}",
        format_money(amount, symbol),
        outcome.category,
        month
    ));
    for txn in outcome.transactions.iter().filter(|txn| txn.is_automatic()) {
        output::info(format!(
            "  auto-allocated {} to {}",
            format_money(txn.amount, symbol),
            txn.category
        ));
    }
    output::info(format!(
        "{} total: {}",
        outcome.category,
        format_money(outcome.category_total, symbol)
    ));
    Ok(())
}

fn single_category(args: &[&str], usage: &str) -> Result<Category, CommandError> {
    match args {
        [token] => parse_category(token),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn cmd_total(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = single_category(args, "total <category>")?;
    let total = SummaryService::category_total(&context.ledger, category);
    output::info(format!(
        "{category} total: {}",
        format_money(total, &context.config.currency_symbol)
    ));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = single_category(args, "chart <category>")?;
    let ledger = &context.ledger;
    let symbol = &context.config.currency_symbol;

    let values = SummaryService::monthly_series(ledger, category);
    let ceiling = SummaryService::chart_ceiling(&values);
    output::section(category);
    for line in monthly_bars(&values, ceiling, symbol) {
        output::info(line);
    }

    let total = SummaryService::category_total(ledger, category);
    output::info(format!("Total: {}", format_money(total, symbol)));

    if category.is_compound() {
        let breakdown = SummaryService::nonzero_breakdown(ledger, category)?;
        output::section(format!("{category} by subcategory"));
        if breakdown.is_empty() {
            output::info("  (no subcategory entries)");
        }
        let breakdown_sum: f64 = breakdown.iter().map(|(_, value)| value).sum();
        for (sub, value) in breakdown {
            output::info(format!(
                "  {:<14} {:>16} {:>7}",
                sub.as_str(),
                format_money(value, symbol),
                format_percent(value, breakdown_sum)
            ));
        }
    }
    Ok(())
}

fn cmd_overview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = &context.ledger;
    let symbol = &context.config.currency_symbol;
    let ceiling = SummaryService::combined_chart_ceiling(ledger);

    let mut columns = vec![TableColumn::left("Month")];
    columns.extend(Category::ALL.iter().map(|c| TableColumn::right(c.as_str())));
    columns.push(TableColumn::right("Total"));
    columns.push(TableColumn::left(""));
    let mut table = Table::new(columns);

    for month in Month::all() {
        let mut row = vec![month.short_label().to_string()];
        row.extend(
            Category::ALL
                .iter()
                .map(|c| format_money(ledger.series(*c).get(month), symbol)),
        );
        let combined = SummaryService::combined_monthly_total(ledger, month);
        row.push(format_money(combined, symbol));
        row.push(bar(combined, ceiling));
        table.push_row(row);
    }

    output::section("All categories");
    table.print();
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let log = SummaryService::transaction_log(&context.ledger);
    output::section("Transaction history");
    if log.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }

    let symbol = &context.config.currency_symbol;
    let mut table = Table::new(vec![
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::left("Subcategory"),
        TableColumn::left("Month"),
        TableColumn::right("Amount"),
    ]);
    for txn in log {
        table.push_row(history_row(txn, symbol));
    }

    let mut lines = table.render_lines().into_iter();
    for header in lines.by_ref().take(2) {
        output::info(header);
    }
    for (line, txn) in lines.zip(log) {
        output::info(tint(&line, txn.source));
    }
    Ok(())
}

fn history_row(txn: &Transaction, symbol: &str) -> Vec<String> {
    vec![
        txn.source.to_string(),
        txn.category.to_string(),
        txn.subcategory_label().to_string(),
        txn.month.label().to_string(),
        format_money(txn.amount, symbol),
    ]
}

fn tint(line: &str, source: SourceType) -> String {
    match source {
        SourceType::Income => line.green().to_string(),
        SourceType::Expense => line.red().to_string(),
        _ => line.blue().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_enforces_positive_numbers() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("12,5").unwrap(), 12.5);
        for bad in ["abc", "", "0", "-3", "inf", "NaN"] {
            assert!(parse_amount(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn history_row_renders_empty_subcategory_for_simple_entries() {
        let txn = Transaction::new(SourceType::Loan, Category::Loan, None, Month::JANUARY, 10.0);
        assert_eq!(
            history_row(&txn, "$"),
            vec!["Loan", "Loan", "", "January", "10.00 $"]
        );
    }
}

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::BufRead;
use std::path::PathBuf;

use crate::auth::AuthClient;
use crate::config::{expand_home, Config};
use crate::models::{
    parse_date, parse_number, IncomeSource, Month, Preference, Profile, SavingsGoal, TimeFrame,
    Transaction, TxnKind,
};
use crate::report;
use crate::store::Store;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &mut Store, config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(store),
        "income" | "i" => cli_income(rest, store),
        "budget" | "b" => cli_budget(rest, store),
        "add" | "a" => cli_add(rest, store),
        "transactions" | "t" => cli_transactions(store),
        "goals" => cli_goals(store),
        "goal" => cli_goal(rest, store),
        "threshold" => cli_threshold(rest, store),
        "profile" => cli_profile(rest, store),
        "settings" => cli_settings(rest, store),
        "export" => cli_export(rest, store),
        "import" => cli_import(rest, store),
        "login" => cli_login(rest, store, config),
        "logout" => {
            if store.clear_token()? {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cachebudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("CacheBudget - student budget tracker");
    println!();
    println!("Usage: cachebudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  summary                                 Monthly income vs spending");
    println!("  income [<month> <source> <amount|off>]  Show or edit monthly income");
    println!("  budget [<category> <limit>]             Show the budget plan or set a limit");
    println!("  budget timeframe <week|month|term>      Set the budget time frame");
    println!("  budget add|remove <category>            Add or remove a category");
    println!("  budget spent <category> <amount>        Record spending for a category");
    println!("  add <date> <income|expense> <amount> <category> <description...>");
    println!("                                          Log a transaction");
    println!("  transactions                            List transactions");
    println!("  goals                                   Savings goal progress");
    println!("  goal <name> <target>                    Add or update a savings goal");
    println!("  threshold [amount]                      Show or set the red zone threshold");
    println!("  profile <name> <email>                  Save the profile");
    println!("  settings <dark-mode|notifications> <on|off>");
    println!("  export [path]                           Export transactions to CSV");
    println!("  import <file.csv>                       Append transactions from CSV");
    println!("  login <email> [password]                Sign in (password read from stdin if omitted)");
    println!("  logout                                  Forget the stored token");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

fn cli_summary(store: &Store) -> Result<()> {
    let txns = store.transactions()?;
    let data = report::monthly_data(&txns);
    let threshold = store.red_zone_threshold()?;
    let red_zone = report::red_zone_months(&data, threshold);

    println!("{:<10} {:>14} {:>14} {:>14}", "Month", "Income", "Spending", "Net");
    println!("{}", "─".repeat(56));
    for (month, summary) in data.iter() {
        let flag = if red_zone.contains(&month) { "  !" } else { "" };
        println!(
            "{:<10} {:>14} {:>14} {:>14}{flag}",
            month.as_str(),
            format_amount(summary.income),
            format_amount(summary.expenses),
            format_amount(summary.net()),
        );
    }
    println!("{}", "─".repeat(56));
    let total = data.total();
    println!(
        "{:<10} {:>14} {:>14} {:>14}",
        "Total",
        format_amount(total.income),
        format_amount(total.expenses),
        format_amount(total.net()),
    );

    if threshold > Decimal::ZERO {
        println!();
        println!("Red zone threshold: {}", format_amount(threshold));
        if !red_zone.is_empty() {
            let names: Vec<&str> = red_zone.iter().map(|m| m.as_str()).collect();
            println!("Months in the red zone: {}", names.join(", "));
        }
    }
    if data.skipped > 0 {
        println!("({} transactions with unreadable dates skipped)", data.skipped);
    }
    Ok(())
}

fn cli_income(args: &[String], store: &Store) -> Result<()> {
    let mut incomes = store.monthly_incomes()?;

    if !args.is_empty() {
        let [month, source, value] = args else {
            anyhow::bail!("Usage: cachebudget income <month> <source> <amount|off>");
        };
        let month = Month::parse(month).ok_or_else(|| anyhow::anyhow!("Unknown month: {month}"))?;
        let source = IncomeSource::parse(source).ok_or_else(|| {
            anyhow::anyhow!("Unknown source: {source} (Salary, Hustle, Freelance, Investment)")
        })?;
        match value.as_str() {
            "off" | "none" => {
                incomes.set_checked(month, source, false);
                println!("Removed {source} from {month}");
            }
            input => match incomes.set_amount_from_input(month, source, input) {
                Some(amount) => println!("{month} {source}: {}", format_amount(amount)),
                None => println!("Removed {source} from {month} (amount must be positive)"),
            },
        }
        store.save_monthly_incomes(&incomes)?;
    }

    print!("{:<10}", "Month");
    for source in IncomeSource::all() {
        print!(" {:>12}", source.as_str());
    }
    println!(" {:>12}", "Total");
    println!("{}", "─".repeat(10 + 13 * 5));
    for month in Month::all() {
        print!("{:<10}", month.as_str());
        for source in IncomeSource::all() {
            let cell = if incomes.is_checked(*month, *source) {
                format_amount(incomes.amount(*month, *source))
            } else {
                "-".to_string()
            };
            print!(" {cell:>12}");
        }
        println!(" {:>12}", format_amount(incomes.month_total(*month)));
    }
    println!("Year total: {}", format_amount(incomes.year_total()));
    Ok(())
}

fn cli_budget(args: &[String], store: &Store) -> Result<()> {
    let mut plan = store.budget_plan()?;

    match args.first().map(String::as_str) {
        None => {}
        Some("timeframe") => {
            let value = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Usage: cachebudget budget timeframe <week|month|term>"))?;
            plan.time_frame = TimeFrame::parse(value)
                .ok_or_else(|| anyhow::anyhow!("Unknown time frame: {value}"))?;
            store.save_budget_plan(&plan)?;
        }
        Some("add") => {
            let name = args[1..].join(" ");
            plan.add_category(&name)?;
            store.save_budget_plan(&plan)?;
            println!("Added category '{}'", name.trim());
        }
        Some("remove") => {
            let name = args[1..].join(" ");
            let index = plan
                .find(&name)
                .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?;
            plan.remove_category(index);
            store.save_budget_plan(&plan)?;
            println!("Removed category '{name}'");
        }
        Some("spent") => {
            let [_, name, amount] = args else {
                anyhow::bail!("Usage: cachebudget budget spent <category> <amount>");
            };
            let index = plan
                .find(name)
                .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?;
            let spent = parse_number(amount).unwrap_or(Decimal::ZERO);
            plan.set_spent(index, spent);
            store.save_budget_plan(&plan)?;
        }
        Some(name) => {
            let input = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Usage: cachebudget budget <category> <limit>"))?;
            let index = plan
                .find(name)
                .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?;
            plan.set_limit_from_input(index, input);
            store.save_budget_plan(&plan)?;
        }
    }

    println!("Budget plan ({})", plan.time_frame);
    println!("{:<20} {:>14} {:>14} {:>8}", "Category", "Limit", "Spent", "Used");
    println!("{}", "─".repeat(59));
    for cat in &plan.categories {
        let pct = report::progress_percent(cat.spent, cat.limit);
        let over = if report::is_over(cat.spent, cat.limit) { " over" } else { "" };
        println!(
            "{:<20} {:>14} {:>14} {:>7.0}%{over}",
            cat.name,
            format_amount(cat.limit),
            format_amount(cat.spent),
            pct,
        );
    }
    println!("Total limit: {}", format_amount(plan.total_limit()));
    Ok(())
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!(
            "Usage: cachebudget add <date> <income|expense> <amount> <category> <description...>"
        );
    }
    let date = &args[0];
    if parse_date(date).is_none() {
        anyhow::bail!("Unreadable date: {date} (use YYYY-MM-DD)");
    }
    let amount = parse_number(&args[2])
        .ok_or_else(|| anyhow::anyhow!("Invalid amount: {}", args[2]))?;
    let txn = Transaction::new(
        date.clone(),
        TxnKind::parse(&args[1]),
        args[4..].join(" "),
        amount,
        args[3].clone(),
    );
    let count = store.add_transaction(txn)?;
    println!("Transaction added ({count} total)");
    Ok(())
}

fn cli_transactions(store: &Store) -> Result<()> {
    let txns = store.transactions()?;
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<4} {:<12} {:<8} {:<30} {:>12} Category",
        "#", "Date", "Type", "Description", "Amount"
    );
    println!("{}", "─".repeat(82));
    for (i, t) in txns.iter().enumerate() {
        println!(
            "{:<4} {:<12} {:<8} {:<30} {:>12} {}",
            i + 1,
            t.date,
            t.kind,
            crate::ui::util::truncate(&t.description, 30),
            format_amount(t.amount),
            t.category,
        );
    }
    Ok(())
}

fn cli_goals(store: &Store) -> Result<()> {
    let goals = store.goals()?;
    if goals.is_empty() {
        println!("No savings goals");
        return Ok(());
    }
    let txns = store.transactions()?;
    for g in report::goal_progress(&goals, &txns) {
        println!(
            "{:<24} {:>14} / {:>14} {:>5.0}%",
            g.name,
            format_amount(g.saved),
            format_amount(g.target),
            g.percent,
        );
    }
    Ok(())
}

fn cli_goal(args: &[String], store: &Store) -> Result<()> {
    let Some((target, name)) = args.split_last().filter(|(_, name)| !name.is_empty()) else {
        anyhow::bail!("Usage: cachebudget goal <name> <target>");
    };
    let target = parse_number(target)
        .filter(|t| *t > Decimal::ZERO)
        .ok_or_else(|| anyhow::anyhow!("Target must be a positive amount"))?;
    let name = name.join(" ");
    let verb = if SavingsGoal::find_by_name(&store.goals()?, &name).is_some() {
        "updated"
    } else {
        "added"
    };
    store.upsert_goal(SavingsGoal::new(name.clone(), target))?;
    println!("Goal '{name}' {verb}: target {}", format_amount(target));
    Ok(())
}

fn cli_threshold(args: &[String], store: &Store) -> Result<()> {
    let threshold = match args.first() {
        Some(input) => store.set_red_zone_threshold(input)?,
        None => store.red_zone_threshold()?,
    };
    if threshold > Decimal::ZERO {
        println!("Red zone threshold: {}", format_amount(threshold));
    } else {
        println!("Red zone disabled");
    }
    Ok(())
}

fn cli_profile(args: &[String], store: &Store) -> Result<()> {
    if args.is_empty() {
        let profile = store.profile()?;
        println!("Name:  {}", profile.name);
        println!("Email: {}", profile.email);
        return Ok(());
    }
    let Some((email, name)) = args.split_last() else {
        anyhow::bail!("Usage: cachebudget profile <name> <email>");
    };
    store.save_profile(&Profile::new(name.join(" "), email.clone()))?;
    println!("Profile saved successfully!");
    Ok(())
}

fn cli_settings(args: &[String], store: &Store) -> Result<()> {
    let mut settings = store.settings()?;
    if let [pref, value] = args {
        let pref = Preference::parse(pref)
            .ok_or_else(|| anyhow::anyhow!("Unknown setting: {pref} (dark-mode, notifications)"))?;
        let on = match value.as_str() {
            "on" | "true" | "yes" => true,
            "off" | "false" | "no" => false,
            other => anyhow::bail!("Expected on or off, got '{other}'"),
        };
        settings.set(pref, on);
        store.save_settings(&settings)?;
        println!("Settings saved successfully!");
    } else if !args.is_empty() {
        anyhow::bail!("Usage: cachebudget settings <dark-mode|notifications> <on|off>");
    }
    for pref in [Preference::DarkMode, Preference::Notifications] {
        let state = if settings.get(pref) { "on" } else { "off" };
        println!("{:<14} {state}", pref.label());
    }
    Ok(())
}

fn cli_export(args: &[String], store: &Store) -> Result<()> {
    let output_path = args
        .first()
        .map(|a| expand_home(a))
        .unwrap_or_else(|| PathBuf::from(crate::transfer::DEFAULT_FILE_NAME));
    let txns = store.transactions()?;
    let count = crate::transfer::export_to_path(&txns, &output_path)?;
    println!("Exported {count} transactions to {}", output_path.display());
    Ok(())
}

fn cli_import(args: &[String], store: &Store) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: cachebudget import <file.csv>");
    };
    println!("{}", import_file(file_path, store)?);
    Ok(())
}

/// Append the rows of a CSV file and describe the result.
fn import_file(file_path: &str, store: &Store) -> Result<String> {
    let path = expand_home(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }
    let txns = crate::transfer::import_from_path(&path)?;
    let appended = store.append_transactions(txns)?;
    let total = store.transactions()?.len();
    Ok(format!("Imported {appended} transactions ({total} total)"))
}

fn cli_login(args: &[String], store: &Store, config: &Config) -> Result<()> {
    let Some(email) = args.first() else {
        anyhow::bail!("Usage: cachebudget login <email> [password]");
    };
    let password = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprint!("Password: ");
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let client = AuthClient::new(&config.api_url)?;
    let token = client.login(email, &password)?;
    store.save_token(&token)?;
    println!("Sign in successful!");
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

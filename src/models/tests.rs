#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── parse_number ──────────────────────────────────────────────

#[test]
fn test_parse_number_plain() {
    assert_eq!(parse_number("42"), Some(dec!(42)));
    assert_eq!(parse_number("12.50"), Some(dec!(12.50)));
    assert_eq!(parse_number("  -3.25  "), Some(dec!(-3.25)));
}

#[test]
fn test_parse_number_trailing_garbage() {
    assert_eq!(parse_number("12abc"), Some(dec!(12)));
    assert_eq!(parse_number("7.5 UGX"), Some(dec!(7.5)));
    assert_eq!(parse_number("1.2.3"), Some(dec!(1.2)));
}

#[test]
fn test_parse_number_leading_dot() {
    assert_eq!(parse_number(".5"), Some(dec!(0.5)));
    assert_eq!(parse_number("-.25"), Some(dec!(-0.25)));
    assert_eq!(parse_number("+.5"), Some(dec!(0.5)));
    assert_eq!(parse_number("5."), Some(dec!(5)));
}

#[test]
fn test_parse_number_rejects_non_numeric() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("-"), None);
    assert_eq!(parse_number("."), None);
    assert_eq!(parse_number("$5"), None);
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_formats() {
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(parse_date("2024-03-09"), Some(expected));
    assert_eq!(parse_date("03/09/2024"), Some(expected));
    assert_eq!(parse_date("2024-03-09T10:15:00Z"), Some(expected));
    assert_eq!(parse_date("yesterday"), None);
}

// ── TxnKind / Transaction ─────────────────────────────────────

#[test]
fn test_txn_kind_parse() {
    assert_eq!(TxnKind::parse("income"), TxnKind::Income);
    assert_eq!(TxnKind::parse("INCOME"), TxnKind::Income);
    assert_eq!(TxnKind::parse("expense"), TxnKind::Expense);
    assert_eq!(TxnKind::parse("refund"), TxnKind::Expense);
    assert_eq!(TxnKind::parse(""), TxnKind::Expense);
}

#[test]
fn test_transaction_json_shape() {
    let txn = Transaction::new(
        "2024-01-15".into(),
        TxnKind::Income,
        "Stipend".into(),
        dec!(250),
        "Income".into(),
    );
    let json = serde_json::to_value(&txn).unwrap();
    assert_eq!(json["type"], "income");
    assert_eq!(json["amount"], 250.0);
    assert_eq!(json["date"], "2024-01-15");
}

#[test]
fn test_transaction_unknown_type_is_expense() {
    let raw = r#"{"date":"2024-02-01","type":"transfer","description":"x","amount":10,"category":"Rent"}"#;
    let txn: Transaction = serde_json::from_str(raw).unwrap();
    assert!(txn.is_expense());
    assert!(!txn.is_income());
    assert_eq!(txn.amount, dec!(10));
}

// ── BudgetPlan ────────────────────────────────────────────────

#[test]
fn test_budget_plan_defaults() {
    let plan = BudgetPlan::default();
    assert_eq!(plan.time_frame, TimeFrame::Week);
    let names: Vec<&str> = plan.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Tuition", "Rent", "Groceries", "Transport", "Entertainment"]
    );
    assert!(plan
        .categories
        .iter()
        .all(|c| c.limit == Decimal::ZERO && c.spent == Decimal::ZERO));
}

#[test]
fn test_non_numeric_limit_defaults_to_zero() {
    let mut plan = BudgetPlan::default();
    plan.set_limit_from_input(0, "500").unwrap();
    assert_eq!(plan.categories[0].limit, dec!(500));
    assert_eq!(plan.set_limit_from_input(0, "lots"), Some(Decimal::ZERO));
    assert_eq!(plan.categories[0].limit, Decimal::ZERO);
}

#[test]
fn test_set_limit_out_of_range() {
    let mut plan = BudgetPlan::default();
    assert_eq!(plan.set_limit_from_input(99, "10"), None);
}

#[test]
fn test_add_and_remove_category() {
    let mut plan = BudgetPlan::default();
    plan.add_category("Books").unwrap();
    assert_eq!(plan.find("books"), Some(5));
    assert!(plan.add_category("RENT").is_err());
    assert!(plan.add_category("   ").is_err());

    let removed = plan.remove_category(5).unwrap();
    assert_eq!(removed.name, "Books");
    assert!(plan.remove_category(5).is_none());
}

#[test]
fn test_time_frame_cycle_and_parse() {
    assert_eq!(TimeFrame::Week.next(), TimeFrame::Month);
    assert_eq!(TimeFrame::Term.next(), TimeFrame::Week);
    assert_eq!(TimeFrame::parse("TERM"), Some(TimeFrame::Term));
    assert_eq!(TimeFrame::parse("year"), None);
    for tf in TimeFrame::all() {
        assert_eq!(TimeFrame::parse(tf.as_str()), Some(*tf));
    }
}

#[test]
fn test_budget_plan_json_uses_camel_case() {
    let plan = BudgetPlan::default();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["timeFrame"], "week");
    assert_eq!(json["categories"][0]["name"], "Tuition");
}

// ── Month / IncomeSource ──────────────────────────────────────

#[test]
fn test_month_parse() {
    assert_eq!(Month::parse("january"), Some(Month::January));
    assert_eq!(Month::parse("Sep"), Some(Month::September));
    assert_eq!(Month::parse("12"), Some(Month::December));
    assert_eq!(Month::parse("0"), None);
    assert_eq!(Month::parse("13"), None);
    assert_eq!(Month::parse("ju"), None);
}

#[test]
fn test_month_index_roundtrip() {
    for (i, month) in Month::all().iter().enumerate() {
        assert_eq!(month.index(), i);
        assert_eq!(Month::from_index(i), Some(*month));
    }
    assert_eq!(Month::from_index(12), None);
}

#[test]
fn test_income_source_parse() {
    assert_eq!(IncomeSource::parse("hustle"), Some(IncomeSource::Hustle));
    assert_eq!(IncomeSource::parse("Gift"), None);
}

// ── MonthlyIncomes ────────────────────────────────────────────

#[test]
fn test_checking_source_inserts_zero() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_checked(Month::March, IncomeSource::Salary, true);
    assert!(incomes.is_checked(Month::March, IncomeSource::Salary));
    assert_eq!(incomes.amount(Month::March, IncomeSource::Salary), Decimal::ZERO);
}

#[test]
fn test_checking_keeps_existing_amount() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_amount_from_input(Month::March, IncomeSource::Salary, "900");
    incomes.set_checked(Month::March, IncomeSource::Salary, true);
    assert_eq!(incomes.amount(Month::March, IncomeSource::Salary), dec!(900));
}

#[test]
fn test_unchecking_removes_amount_from_total() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_amount_from_input(Month::May, IncomeSource::Salary, "1000");
    incomes.set_amount_from_input(Month::May, IncomeSource::Hustle, "250.5");
    assert_eq!(incomes.month_total(Month::May), dec!(1250.5));

    incomes.set_checked(Month::May, IncomeSource::Hustle, false);
    assert_eq!(incomes.month_total(Month::May), dec!(1000));
    assert!(!incomes.is_checked(Month::May, IncomeSource::Hustle));
}

#[test]
fn test_non_positive_amount_removes_source() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "300");
    assert_eq!(
        incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "0"),
        None
    );
    assert!(!incomes.is_checked(Month::June, IncomeSource::Freelance));

    incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "300");
    incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "-5");
    assert!(!incomes.is_checked(Month::June, IncomeSource::Freelance));

    incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "300");
    incomes.set_amount_from_input(Month::June, IncomeSource::Freelance, "n/a");
    assert!(!incomes.is_checked(Month::June, IncomeSource::Freelance));
}

#[test]
fn test_edited_month_is_kept_even_when_empty() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_checked(Month::July, IncomeSource::Salary, true);
    incomes.set_checked(Month::July, IncomeSource::Salary, false);
    assert!(incomes.0.contains_key(&Month::July));
    assert_eq!(incomes.month_total(Month::July), Decimal::ZERO);
}

#[test]
fn test_yearly_totals() {
    let mut incomes = MonthlyIncomes::default();
    incomes.set_amount_from_input(Month::January, IncomeSource::Salary, "100");
    incomes.set_amount_from_input(Month::December, IncomeSource::Investment, "50");
    let totals = incomes.yearly_totals();
    assert_eq!(totals[0], dec!(100));
    assert_eq!(totals[11], dec!(50));
    assert_eq!(totals[5], Decimal::ZERO);
    assert_eq!(incomes.year_total(), dec!(150));
}

#[test]
fn test_totals_saturate_at_decimal_max() {
    let max = Decimal::MAX.to_string();
    let mut incomes = MonthlyIncomes::default();
    incomes.set_amount_from_input(Month::July, IncomeSource::Salary, &max);
    incomes.set_amount_from_input(Month::July, IncomeSource::Hustle, &max);
    incomes.set_amount_from_input(Month::August, IncomeSource::Salary, &max);
    assert_eq!(incomes.month_total(Month::July), Decimal::MAX);
    assert_eq!(incomes.year_total(), Decimal::MAX);

    let mut plan = BudgetPlan::default();
    plan.set_limit_from_input(0, &max);
    plan.set_limit_from_input(1, &max);
    assert_eq!(plan.total_limit(), Decimal::MAX);
    assert_eq!(saturating_sum([dec!(1), dec!(2.5)]), dec!(3.5));
}

#[test]
fn test_monthly_incomes_json_shape() {
    let raw = r#"{"January":{"Salary":1200,"Hustle":0},"February":{}}"#;
    let incomes: MonthlyIncomes = serde_json::from_str(raw).unwrap();
    assert_eq!(incomes.month_total(Month::January), dec!(1200));
    assert!(incomes.is_checked(Month::January, IncomeSource::Hustle));
    assert_eq!(incomes.month_total(Month::February), Decimal::ZERO);

    let json = serde_json::to_value(&incomes).unwrap();
    assert_eq!(json["January"]["Salary"], 1200.0);
}

// ── Profile / Settings ────────────────────────────────────────

#[test]
fn test_profile_validation() {
    assert!(Profile::new("Ada".into(), "ada@example.com".into())
        .validate()
        .is_ok());
    let err = Profile::new("  ".into(), "ada@example.com".into())
        .validate()
        .unwrap_err();
    assert_eq!(err.to_string(), "Please fill in all profile fields.");
    assert!(Profile::new("Ada".into(), String::new()).validate().is_err());
}

#[test]
fn test_settings_toggle() {
    let mut settings = Settings::default();
    assert!(!settings.dark_mode);
    assert!(settings.toggle(Preference::DarkMode));
    assert!(settings.dark_mode);
    assert!(!settings.notifications);

    let json = serde_json::to_value(settings).unwrap();
    assert_eq!(json["darkMode"], true);
    assert_eq!(json["notifications"], false);
}

#[test]
fn test_preference_parse() {
    assert_eq!(Preference::parse("dark-mode"), Some(Preference::DarkMode));
    assert_eq!(Preference::parse("Notifications"), Some(Preference::Notifications));
    assert_eq!(Preference::parse("sound"), None);
}

#[test]
fn test_goal_find_by_name() {
    let goals = vec![
        SavingsGoal::new("Laptop".into(), dec!(1500)),
        SavingsGoal::new("Trip".into(), dec!(800)),
    ];
    assert_eq!(
        SavingsGoal::find_by_name(&goals, "laptop").map(|g| g.target),
        Some(dec!(1500))
    );
    assert!(SavingsGoal::find_by_name(&goals, "car").is_none());
}

use chrono::NaiveDate;
use finance_ledger_core::errors::CoreError;
use finance_ledger_core::models::budget::{BudgetHorizon, BudgetLimits};
use finance_ledger_core::models::category::{CategoryDefinition, CategoryDisplay, FALLBACK_ICON};
use finance_ledger_core::models::ledger::Ledger;
use finance_ledger_core::models::period::MonthPeriod;
use finance_ledger_core::models::record::{FinancialRecord, RecordDraft, RecordKind, Recurrence};
use finance_ledger_core::models::settings::{Settings, WeekStart};
use finance_ledger_core::palette::ColorTag;
use std::collections::HashSet;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  RecordKind
// ═══════════════════════════════════════════════════════════════════

mod record_kind {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(RecordKind::Expense.to_string(), "expense");
        assert_eq!(RecordKind::Income.to_string(), "income");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RecordKind::Expense).unwrap(), "\"expense\"");
        let back: RecordKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(back, RecordKind::Income);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Recurrence
// ═══════════════════════════════════════════════════════════════════

mod recurrence {
    use super::*;

    #[test]
    fn valid_shapes_pass() {
        assert!(Recurrence::Weekly { weekday: 0 }.validate().is_ok());
        assert!(Recurrence::Weekly { weekday: 6 }.validate().is_ok());
        assert!(Recurrence::Monthly { day_of_month: 1 }.validate().is_ok());
        assert!(Recurrence::Monthly { day_of_month: 31 }.validate().is_ok());
        assert!(Recurrence::Annually { month: 0, day_of_month: 1 }.validate().is_ok());
        assert!(Recurrence::Annually { month: 11, day_of_month: 31 }.validate().is_ok());
    }

    #[test]
    fn weekday_out_of_range() {
        let err = Recurrence::Weekly { weekday: 7 }.validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn day_of_month_out_of_range() {
        assert!(Recurrence::Monthly { day_of_month: 0 }.validate().is_err());
        assert!(Recurrence::Monthly { day_of_month: 32 }.validate().is_err());
        assert!(Recurrence::Annually { month: 3, day_of_month: 0 }.validate().is_err());
    }

    #[test]
    fn annual_month_out_of_range() {
        assert!(Recurrence::Annually { month: 12, day_of_month: 1 }.validate().is_err());
    }

    #[test]
    fn display_descriptions() {
        assert_eq!(Recurrence::Weekly { weekday: 1 }.to_string(), "Every Monday");
        assert_eq!(Recurrence::Monthly { day_of_month: 15 }.to_string(), "Monthly on day 15");
        assert_eq!(
            Recurrence::Annually { month: 2, day_of_month: 3 }.to_string(),
            "Annually on March 3"
        );
    }

    #[test]
    fn json_carries_only_fields_of_its_frequency() {
        let json = serde_json::to_value(Recurrence::Monthly { day_of_month: 5 }).unwrap();
        let inner = &json["monthly"];
        assert_eq!(inner["day_of_month"], 5);
        assert!(inner.get("weekday").is_none());
        assert!(inner.get("month").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinancialRecord
// ═══════════════════════════════════════════════════════════════════

mod financial_record {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let ids: HashSet<_> = (0..50)
            .map(|_| FinancialRecord::expense("Coffee", 3.0, "Food", d(2025, 1, 1)).id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn one_time_by_default() {
        let r = FinancialRecord::income("Pay", 1000.0, "Salary", d(2025, 1, 31));
        assert!(!r.is_recurring());
        assert!(r.recurrence.is_none());
        assert!(r.description.is_none());
    }

    #[test]
    fn builders_attach_metadata() {
        let r = FinancialRecord::expense("Rent", 900.0, "Bills", d(2025, 2, 1))
            .with_recurrence(Recurrence::Monthly { day_of_month: 1 })
            .with_description("Flat on Main St");
        assert!(r.is_recurring());
        assert_eq!(r.description.as_deref(), Some("Flat on Main St"));
    }

    #[test]
    fn signed_amount_follows_kind() {
        assert_eq!(FinancialRecord::expense("a", 10.0, "Food", d(2025, 1, 1)).signed_amount(), -10.0);
        assert_eq!(FinancialRecord::income("b", 10.0, "Salary", d(2025, 1, 1)).signed_amount(), 10.0);
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let r = FinancialRecord::expense("Gym", 40.0, "Health", d(2025, 3, 4))
            .with_recurrence(Recurrence::Weekly { weekday: 2 });
        let json = serde_json::to_string(&r).unwrap();
        let back: FinancialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn json_without_optional_fields_deserializes() {
        let json = r#"{
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "title": "Taxi",
            "amount": 18.5,
            "category": "Transport",
            "date": "2025-04-02",
            "kind": "expense"
        }"#;
        let r: FinancialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.title, "Taxi");
        assert!(r.recurrence.is_none());
        assert!(r.description.is_none());
    }

    #[test]
    fn draft_roundtrip_keeps_id_supplied() {
        let r = FinancialRecord::expense("Book", 12.0, "Shopping", d(2025, 5, 5));
        let mut draft = RecordDraft::from(&r);
        draft.amount = 15.0;
        let updated = draft.into_record(r.id);
        assert_eq!(updated.id, r.id);
        assert_eq!(updated.amount, 15.0);
        assert_eq!(updated.title, "Book");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CategoryDefinition
// ═══════════════════════════════════════════════════════════════════

mod category_definition {
    use super::*;

    #[test]
    fn defaults_have_six_expense_and_four_income() {
        let defaults = CategoryDefinition::defaults();
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults.iter().filter(|c| c.kind == RecordKind::Expense).count(), 6);
        assert_eq!(defaults.iter().filter(|c| c.kind == RecordKind::Income).count(), 4);
        assert!(defaults.iter().all(|c| c.is_default));
    }

    #[test]
    fn defaults_order_and_styles() {
        let defaults = CategoryDefinition::defaults();
        let names: Vec<&str> = defaults.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Food", "Transport", "Shopping", "Bills", "Entertainment", "Health",
                "Salary", "Freelance", "Investment", "Business"
            ]
        );
        assert_eq!(defaults[0].icon, "restaurant");
        assert_eq!(defaults[0].color, ColorTag::Orange);
        assert_eq!(defaults[6].color, ColorTag::Emerald);
    }

    #[test]
    fn defaults_are_unique_per_kind() {
        let defaults = CategoryDefinition::defaults();
        let keys: HashSet<_> = defaults.iter().map(|c| (c.kind, c.name.to_lowercase())).collect();
        assert_eq!(keys.len(), defaults.len());
    }

    #[test]
    fn user_categories_are_not_default() {
        let c = CategoryDefinition::new("Pets", "paw", ColorTag::Teal, RecordKind::Expense);
        assert!(!c.is_default);
    }

    #[test]
    fn matches_name_ignores_case_and_padding() {
        let c = CategoryDefinition::new("Food", "restaurant", ColorTag::Orange, RecordKind::Expense);
        assert!(c.matches_name("food"));
        assert!(c.matches_name("  FOOD "));
        assert!(!c.matches_name("Foods"));
    }

    #[test]
    fn fallback_display() {
        let f = CategoryDisplay::fallback();
        assert_eq!(f.icon, FALLBACK_ICON);
        assert_eq!(f.color, ColorTag::Gray);
        assert!(f.is_orphaned);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ColorTag
// ═══════════════════════════════════════════════════════════════════

mod color_tag {
    use super::*;

    #[test]
    fn hex_values() {
        assert_eq!(ColorTag::Orange.hex(), "#f97316");
        assert_eq!(ColorTag::Gray.hex(), "#6b7280");
        assert_eq!(ColorTag::Emerald.hex(), "#10b981");
    }

    #[test]
    fn rgb_components() {
        assert_eq!(ColorTag::Blue.rgb(), (0x3b, 0x82, 0xf6));
    }

    #[test]
    fn from_name_roundtrips_every_tag() {
        for tag in ColorTag::ALL {
            assert_eq!(ColorTag::from_name(&tag.to_string()), Some(tag));
        }
        assert_eq!(ColorTag::from_name("  Teal "), Some(ColorTag::Teal));
        assert_eq!(ColorTag::from_name("magenta"), None);
    }

    #[test]
    fn default_is_gray() {
        assert_eq!(ColorTag::default(), ColorTag::Gray);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MonthPeriod
// ═══════════════════════════════════════════════════════════════════

mod month_period {
    use super::*;

    #[test]
    fn rejects_month_index_twelve() {
        let err = MonthPeriod::new(2025, 12).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPeriod(12)));
    }

    #[test]
    fn accepts_bounds() {
        assert!(MonthPeriod::new(2025, 0).is_ok());
        assert!(MonthPeriod::new(2025, 11).is_ok());
    }

    #[test]
    fn contains_uses_calendar_fields() {
        let march = MonthPeriod::new(2025, 2).unwrap();
        assert!(march.contains(d(2025, 3, 1)));
        assert!(march.contains(d(2025, 3, 31)));
        assert!(!march.contains(d(2025, 2, 28)));
        assert!(!march.contains(d(2025, 4, 1)));
        assert!(!march.contains(d(2024, 3, 15)));
    }

    #[test]
    fn containing_date() {
        let p = MonthPeriod::containing(d(2024, 12, 25));
        assert_eq!(p.year(), 2024);
        assert_eq!(p.month_index(), 11);
    }

    #[test]
    fn next_rolls_over_year() {
        let dec = MonthPeriod::new(2024, 11).unwrap();
        assert_eq!(dec.next(), MonthPeriod::new(2025, 0).unwrap());
        assert_eq!(MonthPeriod::new(2025, 4).unwrap().next(), MonthPeriod::new(2025, 5).unwrap());
    }

    #[test]
    fn previous_rolls_back_year() {
        let jan = MonthPeriod::new(2025, 0).unwrap();
        assert_eq!(jan.previous(), MonthPeriod::new(2024, 11).unwrap());
    }

    #[test]
    fn first_and_last_day() {
        let feb_leap = MonthPeriod::new(2024, 1).unwrap();
        assert_eq!(feb_leap.first_day(), Some(d(2024, 2, 1)));
        assert_eq!(feb_leap.last_day(), Some(d(2024, 2, 29)));
        let dec = MonthPeriod::new(2025, 11).unwrap();
        assert_eq!(dec.last_day(), Some(d(2025, 12, 31)));
    }

    #[test]
    fn label_and_display() {
        let p = MonthPeriod::new(2025, 2).unwrap();
        assert_eq!(p.label(), "March 2025");
        assert_eq!(p.to_string(), "2025-03");
    }

    #[test]
    fn deserialize_rejects_month_index_twelve() {
        let result = serde_json::from_str::<MonthPeriod>(r#"{"year":2025,"month_index":12}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid month index 12"));
    }

    #[test]
    fn deserialize_valid_period() {
        let p: MonthPeriod = serde_json::from_str(r#"{"year":2025,"month_index":11}"#).unwrap();
        assert_eq!(p, MonthPeriod::new(2025, 11).unwrap());
        assert_eq!(p.label(), "December 2025");
    }

    #[test]
    fn bincode_rejects_out_of_range_period() {
        #[derive(serde::Serialize)]
        struct Raw {
            year: i32,
            month_index: u32,
        }
        let bytes = bincode::serialize(&Raw { year: 2025, month_index: 40 }).unwrap();
        assert!(bincode::deserialize::<MonthPeriod>(&bytes).is_err());

        let ok = bincode::serialize(&MonthPeriod::new(2025, 4).unwrap()).unwrap();
        assert_eq!(
            bincode::deserialize::<MonthPeriod>(&ok).unwrap(),
            MonthPeriod::new(2025, 4).unwrap()
        );
    }

    #[test]
    fn ordering_is_chronological() {
        let a = MonthPeriod::new(2024, 11).unwrap();
        let b = MonthPeriod::new(2025, 0).unwrap();
        assert!(a < b);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  BudgetLimits & Settings
// ═══════════════════════════════════════════════════════════════════

mod budget_limits {
    use super::*;

    #[test]
    fn default_seed_values() {
        let l = BudgetLimits::default();
        assert_eq!(l.daily_limit, 50.0);
        assert_eq!(l.weekly_limit, 300.0);
        assert_eq!(l.monthly_limit, 1200.0);
    }

    #[test]
    fn limit_for_horizon() {
        let l = BudgetLimits::new(10.0, 70.0, 280.0);
        assert_eq!(l.limit_for(BudgetHorizon::Daily), 10.0);
        assert_eq!(l.limit_for(BudgetHorizon::Weekly), 70.0);
        assert_eq!(l.limit_for(BudgetHorizon::Monthly), 280.0);
    }

    #[test]
    fn validate_accepts_zero_and_positive() {
        assert!(BudgetLimits::new(0.0, 70.0, 280.0).validate().is_ok());
        assert!(BudgetLimits::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_and_non_finite() {
        for bad in [
            BudgetLimits::new(-1.0, 70.0, 280.0),
            BudgetLimits::new(10.0, f64::NAN, 280.0),
            BudgetLimits::new(10.0, 70.0, f64::INFINITY),
        ] {
            assert!(matches!(bad.validate(), Err(CoreError::ValidationError(_))));
        }
    }

    #[test]
    fn horizon_display() {
        assert_eq!(BudgetHorizon::Weekly.to_string(), "Weekly");
    }
}

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.currency_symbol, "$");
        assert_eq!(s.week_start, WeekStart::Sunday);
    }

    #[test]
    fn start_of_week_sunday() {
        // 2025-03-12 is a Wednesday
        assert_eq!(WeekStart::Sunday.start_of_week(d(2025, 3, 12)), d(2025, 3, 9));
        assert_eq!(WeekStart::Sunday.start_of_week(d(2025, 3, 9)), d(2025, 3, 9));
    }

    #[test]
    fn start_of_week_monday() {
        assert_eq!(WeekStart::Monday.start_of_week(d(2025, 3, 12)), d(2025, 3, 10));
        // Sunday belongs to the week that began the previous Monday
        assert_eq!(WeekStart::Monday.start_of_week(d(2025, 3, 16)), d(2025, 3, 10));
    }

    #[test]
    fn validate_symbol_length() {
        let with = |symbol: &str| Settings {
            currency_symbol: symbol.into(),
            week_start: WeekStart::Sunday,
        };
        assert!(with("zł").validate().is_ok());
        assert!(with("CHF").validate().is_ok());
        assert!(with("  ").validate().is_err());
        assert!(with("dollars").validate().is_err());
    }

    #[test]
    fn week_can_start_in_previous_month() {
        // 2025-04-01 is a Tuesday
        assert_eq!(WeekStart::Sunday.start_of_week(d(2025, 4, 1)), d(2025, 3, 30));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    #[test]
    fn default_is_empty_with_lazy_limits() {
        let l = Ledger::default();
        assert!(l.records.is_empty());
        assert!(l.categories.is_empty());
        assert!(l.budget_limits.is_none());
        assert!(l.trash.is_empty());
        assert!(!l.categories_initialised);
    }

    #[test]
    fn json_without_category_flag_reads_as_uninitialised() {
        let json = serde_json::to_string(&Ledger::default()).unwrap();
        let stripped = json.replace(",\"categories_initialised\":false", "");
        assert_ne!(json, stripped);
        let back: Ledger = serde_json::from_str(&stripped).unwrap();
        assert!(!back.categories_initialised);
    }

    #[test]
    fn json_roundtrip() {
        let mut l = Ledger::default();
        l.records.push(
            FinancialRecord::expense("Netflix", 15.99, "Entertainment", d(2025, 1, 3))
                .with_recurrence(Recurrence::Monthly { day_of_month: 3 }),
        );
        l.categories = CategoryDefinition::defaults();
        l.budget_limits = Some(BudgetLimits::new(20.0, 100.0, 400.0));
        let json = serde_json::to_string(&l).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }

    #[test]
    fn bincode_roundtrip() {
        let mut l = Ledger::default();
        l.records.push(
            FinancialRecord::income("Bonus", 500.0, "Salary", d(2025, 6, 30))
                .with_recurrence(Recurrence::Annually { month: 5, day_of_month: 30 }),
        );
        l.settings.week_start = WeekStart::Monday;
        let bytes = bincode::serialize(&l).unwrap();
        let back: Ledger = bincode::deserialize(&bytes).unwrap();
        assert_eq!(l, back);
    }
}

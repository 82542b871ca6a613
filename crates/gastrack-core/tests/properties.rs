use std::collections::HashSet;

use gastrack_core::{
    find_customers, rank_customers, validate_barcode, validate_order_number, CustomerRecord,
    FieldKind, OrganizationFormatConfig, ValidationError,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn customers() -> impl Strategy<Value = Vec<CustomerRecord>> {
    prop::collection::vec(
        ("[a-cA-C ]{0,8}", prop::option::of("[a-cA-C0-9 ]{0,6}")),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, barcode))| CustomerRecord::new(i.to_string(), name, barcode.as_deref()))
            .collect()
    })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn blank_input_is_always_empty_error(raw in "[ \t\r\n]{0,8}") {
        let config = OrganizationFormatConfig::default();
        prop_assert_eq!(
            validate_barcode(&raw, &config),
            Err(ValidationError::Empty { field: FieldKind::Barcode })
        );
        prop_assert_eq!(
            validate_order_number(&raw, &config),
            Err(ValidationError::Empty { field: FieldKind::OrderNumber })
        );
    }

    #[test]
    fn charset_barcode_within_bounds_is_valid(
        value in "[A-Za-z0-9_*%-]{3,50}",
        pad in "[ \t]{0,3}"
    ) {
        let config = OrganizationFormatConfig::default();
        let raw = format!("{pad}{value}{pad}");
        prop_assert_eq!(validate_barcode(&raw, &config), Ok(()));
    }

    #[test]
    fn charset_barcode_out_of_bounds_is_rejected(value in "[A-Za-z0-9]{1,2}|[A-Za-z0-9]{51,80}") {
        let config = OrganizationFormatConfig::default();
        let rejected = matches!(
            validate_barcode(&value, &config),
            Err(ValidationError::TooShort { .. } | ValidationError::TooLong { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn charset_order_number_of_any_length_is_valid(value in "[A-Za-z0-9_-]{1,200}") {
        let config = OrganizationFormatConfig::default();
        prop_assert_eq!(validate_order_number(&value, &config), Ok(()));
    }

    #[test]
    fn blank_query_returns_input_unchanged(customers in customers(), query in "[ \t]{0,4}") {
        let hits = find_customers(&query, &customers);
        let expected: Vec<&CustomerRecord> = customers.iter().collect();
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn results_are_unique_input_records(customers in customers(), query in "[a-cA-C0-9 ]{1,4}") {
        let ranked = rank_customers(&query, &customers);

        let mut seen = HashSet::new();
        for candidate in &ranked {
            prop_assert!(seen.insert(candidate.customer.id.as_str()));
            prop_assert!(customers.iter().any(|c| std::ptr::eq(c, candidate.customer)));
        }
        prop_assert!(ranked.len() <= customers.len());
    }

    #[test]
    fn name_prefix_match_is_always_found(customers in customers(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!customers.is_empty());
        let target = &customers[pick.index(customers.len())];
        prop_assume!(!target.name.trim().is_empty());

        let hits = find_customers(&target.name, &customers);
        prop_assert!(hits.iter().any(|c| c.id == target.id));
    }
}

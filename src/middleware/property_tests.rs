//! Property-Based Tests for the middleware
//!
//! Key derivation and policy parsing invariants checked with proptest.

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::middleware::{cache_control_value, derive_key, derive_policy, CacheOptions};
use crate::models::{Accessibility, RequestDescriptor};

// == Strategies ==
fn method_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("GET"), Just("HEAD"), Just("POST")].prop_map(str::to_string)
}

fn path_strategy() -> impl Strategy<Value = String> {
    "(/[a-z0-9_-]{1,10}){1,4}"
}

/// Query parameters; `None` marks a parameter given without a value
fn query_strategy() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::vec(
        ("[a-z]{1,6}", prop::option::weighted(0.8, "[a-zA-Z0-9]{1,6}")),
        0..6,
    )
}

fn defaults_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,6}", 0..4)
}

fn accessibility_strategy() -> impl Strategy<Value = Option<Accessibility>> {
    prop_oneof![
        Just(None),
        Just(Some(Accessibility::Public)),
        Just(Some(Accessibility::Private)),
    ]
}

fn descriptor(method: &str, path: &str, params: &[(String, Option<String>)]) -> RequestDescriptor {
    params
        .iter()
        .fold(RequestDescriptor::new(method, path), |request, (name, value)| {
            match value {
                Some(value) => request.with_query(name.clone(), value.clone()),
                None => request.with_null_query(name.clone()),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Repeated derivation with identical inputs yields the identical key.
    #[test]
    fn prop_key_is_deterministic(
        method in method_strategy(),
        path in path_strategy(),
        params in query_strategy(),
        defaults in defaults_strategy(),
    ) {
        let request = descriptor(&method, &path, &params);
        let mut options = CacheOptions::new().prefix("svc");
        options.defaults = defaults;

        prop_assert_eq!(derive_key(&request, &options), derive_key(&request, &options));
    }

    // The order query parameters arrive in does not change the key.
    #[test]
    fn prop_key_ignores_query_order(
        path in path_strategy(),
        params in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,6}", 0..6),
    ) {
        let forward: Vec<(String, Option<String>)> =
            params.iter().map(|(k, v)| (k.clone(), Some(v.clone()))).collect();
        let backward: Vec<(String, Option<String>)> = forward.iter().rev().cloned().collect();

        let options = CacheOptions::default();
        prop_assert_eq!(
            derive_key(&descriptor("GET", &path, &forward), &options),
            derive_key(&descriptor("GET", &path, &backward), &options)
        );
    }

    // The key is `{METHOD}:{path}` followed by nothing or a `?` with sorted pairs.
    #[test]
    fn prop_key_shape(
        method in method_strategy(),
        path in path_strategy(),
        params in query_strategy(),
    ) {
        let key = derive_key(&descriptor(&method, &path, &params), &CacheOptions::default());
        let base = format!("{}:{}", method, path);
        prop_assert!(key.starts_with(&base));

        let rest = &key[base.len()..];
        // Later duplicates override earlier ones, as in the descriptor
        let effective: BTreeMap<String, Option<String>> = params.iter().cloned().collect();
        if rest.is_empty() {
            prop_assert!(effective.values().all(Option::is_none));
        } else {
            prop_assert!(rest.starts_with('?'));
            let names: Vec<&str> = rest[1..]
                .split('&')
                .map(|pair| pair.split('=').next().unwrap_or_default())
                .collect();
            let mut sorted = names.clone();
            sorted.sort();
            prop_assert_eq!(names, sorted);
        }
    }

    // Any prefix ends up followed by exactly one colon, with or without one supplied.
    #[test]
    fn prop_prefix_normalization(prefix in "[A-Za-z]{1,12}", path in path_strategy()) {
        let request = RequestDescriptor::new("GET", path.clone());
        let bare = derive_key(&request, &CacheOptions::new().prefix(prefix.clone()));
        let colon = derive_key(&request, &CacheOptions::new().prefix(format!("{}:", prefix)));

        prop_assert_eq!(&bare, &colon);
        prop_assert_eq!(bare, format!("{}:GET:{}", prefix, path));
    }

    // Defaults never override a value the request supplied.
    #[test]
    fn prop_request_values_win(name in "[a-z]{1,6}", value in "[0-9]{1,4}", default in "[a-z]{1,4}") {
        let request = RequestDescriptor::new("GET", "/x").with_query(name.clone(), value.clone());
        let options = CacheOptions::new().default_param(name.clone(), default);

        prop_assert_eq!(derive_key(&request, &options), format!("GET:/x?{}={}", name, value));
    }

    // A header rendered from a policy parses back into the same policy.
    #[test]
    fn prop_policy_reads_what_it_writes(
        max_age in 0u64..10_000_000,
        accessibility in accessibility_strategy(),
    ) {
        let policy = derive_policy(Some(cache_control_value(accessibility, max_age).as_str())).unwrap();

        prop_assert_eq!(policy.max_age, max_age);
        prop_assert_eq!(policy.accessibility, accessibility);
    }

    // Headers without a max-age directive never produce a policy.
    #[test]
    fn prop_no_max_age_no_policy(header in "[a-z, -]{0,40}") {
        prop_assume!(!header.contains("max-age="));
        prop_assert_eq!(derive_policy(Some(header.as_str())), None);
    }
}

//! Shared proptest strategies.

use proptest::prelude::*;

/// Parameter names as handlers use them.
pub(crate) fn arb_param_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap()
}

/// Non-empty free text, including characters that need percent-encoding.
pub(crate) fn arb_text() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("non-empty", |s| !s.is_empty())
}

/// URLs with a scheme or a network-path authority.
pub(crate) fn arb_non_relative_url() -> impl Strategy<Value = String> {
    prop_oneof![
        (prop::sample::select(vec!["http", "https", "ftp", "javascript", "data"]), arb_host())
            .prop_map(|(scheme, host)| format!("{scheme}://{host}/")),
        arb_host().prop_map(|host| format!("//{host}")),
        arb_host().prop_map(|host| format!("/\\{host}")),
    ]
}

fn arb_host() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,10}\\.[a-z]{2,3}").unwrap()
}

/// Every accepted boolean token with its value.
pub(crate) fn arb_bool_token() -> impl Strategy<Value = (String, bool)> {
    prop::sample::select(vec![
        ("1", true),
        ("true", true),
        ("YES", true),
        ("On", true),
        ("0", false),
        ("FALSE", false),
        ("no", false),
        ("off", false),
    ])
    .prop_map(|(token, value)| (token.to_string(), value))
}

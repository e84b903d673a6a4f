use serde_json::{json, Value};
use zobject::{
    canonicalize_json, hybridize_json, normalize_json, to_canonical, to_hybrid, to_normal, ZObject,
};

fn z(v: Value) -> ZObject {
    ZObject::try_from(v).unwrap()
}

fn r(id: &str) -> Value {
    json!({"Z1K1": "Z9", "Z9K1": id})
}

fn s(text: &str) -> Value {
    json!({"Z1K1": "Z6", "Z6K1": text})
}

fn normal_list_type(element: &str) -> Value {
    json!({"Z1K1": r("Z7"), "Z7K1": r("Z881"), "Z881K1": r(element)})
}

/// A stored monolingual label, in all three forms.
fn label_forms() -> (Value, Value, Value) {
    let canonical = json!({
        "Z1K1": "Z12",
        "Z12K1": ["Z11", {"Z1K1": "Z11", "Z11K1": "Z1002", "Z11K2": "add"}]
    });
    let hybrid = json!({
        "Z1K1": r("Z12"),
        "Z12K1": [
            r("Z11"),
            {"Z1K1": r("Z11"), "Z11K1": r("Z1002"), "Z11K2": s("add")}
        ]
    });
    let normal = json!({
        "Z1K1": r("Z12"),
        "Z12K1": {
            "Z1K1": normal_list_type("Z11"),
            "K1": {"Z1K1": r("Z11"), "Z11K1": r("Z1002"), "Z11K2": s("add")}
        }
    });
    (canonical, hybrid, normal)
}

#[test]
fn hybrid_then_canonical_returns_the_original_list() {
    let original = z(json!(["Z6", "a", "b"]));
    assert_eq!(to_canonical(&to_hybrid(&original)), original);
}

#[test]
fn normal_chain_canonicalizes_to_an_array() {
    let node = json!({
        "Z1K1": {"Z1K1": "Z7", "Z7K1": "Z881", "Z881K1": "Z6"},
        "K1": "a",
        "K2": {"Z1K1": {"Z1K1": "Z7", "Z7K1": "Z881", "Z881K1": "Z6"}, "K1": "b"}
    });
    assert_eq!(to_canonical(&z(node)).to_json(), json!(["Z6", "a", "b"]));
}

#[test]
fn every_form_reaches_every_other() {
    let (canonical, hybrid, normal) = label_forms();
    for input in [&canonical, &hybrid, &normal] {
        let value = z(input.clone());
        assert_eq!(to_canonical(&value).to_json(), canonical, "canonical from {input}");
        assert_eq!(to_hybrid(&value).to_json(), hybrid, "hybrid from {input}");
        assert_eq!(to_normal(&value).to_json(), normal, "normal from {input}");
    }
}

#[test]
fn conversions_are_idempotent_on_their_output() {
    let (canonical, hybrid, normal) = label_forms();
    for v in [canonical, hybrid, normal] {
        let value = z(v);
        let c = to_canonical(&value);
        assert_eq!(to_canonical(&c), c);
        let h = to_hybrid(&value);
        assert_eq!(to_hybrid(&h), h);
        let n = to_normal(&value);
        assert_eq!(to_normal(&n), n);
    }
}

#[test]
fn persistent_function_round_trip() {
    let canonical = json!({
        "Z1K1": "Z2",
        "Z2K1": {"Z1K1": "Z6", "Z6K1": "Z10001"},
        "Z2K2": {
            "Z1K1": "Z8",
            "Z8K1": [
                "Z17",
                {"Z1K1": "Z17", "Z17K1": "Z6", "Z17K2": "Z10001K1", "Z17K3": {"Z1K1": "Z12", "Z12K1": ["Z11"]}}
            ],
            "Z8K2": "Z6",
            "Z8K3": ["Z20"],
            "Z8K4": ["Z14"],
            "Z8K5": "Z10001"
        },
        "Z2K3": {"Z1K1": "Z12", "Z12K1": ["Z11", {"Z1K1": "Z11", "Z11K1": "Z1002", "Z11K2": "echo"}]},
        "Z2K4": {"Z1K1": "Z32", "Z32K1": ["Z31"]},
        "Z2K5": {"Z1K1": "Z12", "Z12K1": ["Z11"]}
    });
    let value = z(canonical.clone());
    let hybrid = to_hybrid(&value);
    assert_eq!(hybrid.to_json()["Z2K1"], s("Z10001"));
    assert_eq!(hybrid.to_json()["Z2K2"]["Z8K5"], r("Z10001"));
    assert_eq!(to_canonical(&hybrid).to_json(), canonical);
    assert_eq!(to_canonical(&to_normal(&value)).to_json(), canonical);
}

#[test]
fn ambiguous_strings_keep_their_kind() {
    // Text that looks like a reference stays a String through every form.
    let canonical = json!({"Z1K1": "Z11", "Z11K1": "Z1002", "Z11K2": {"Z1K1": "Z6", "Z6K1": "Z400"}});
    let value = z(canonical.clone());
    assert_eq!(to_hybrid(&value).to_json()["Z11K2"], s("Z400"));
    assert_eq!(to_canonical(&to_hybrid(&value)).to_json(), canonical);
    assert_eq!(to_canonical(&to_normal(&value)).to_json(), canonical);
}

#[test]
fn empty_reference_survives_round_trips() {
    let canonical = json!({"Z1K1": "Z7", "Z7K1": {"Z1K1": "Z9", "Z9K1": ""}});
    let value = z(canonical.clone());
    assert_eq!(to_canonical(&value).to_json(), canonical);
    assert_eq!(to_canonical(&to_hybrid(&value)).to_json(), canonical);
    assert_eq!(to_hybrid(&value).to_json()["Z7K1"], r(""));
}

#[test]
fn quotes_are_opaque_everywhere() {
    let payload = json!({"Z1K1": "Z6", "Z6K1": "raw", "extra": ["Z6", "x"]});
    let quote = json!({"Z1K1": "Z99", "Z99K1": payload});
    let value = z(quote.clone());
    assert_eq!(to_hybrid(&value).to_json()["Z99K1"], payload);
    assert_eq!(to_normal(&value).to_json()["Z99K1"], payload);
    assert_eq!(to_canonical(&to_hybrid(&value)).to_json(), quote);
}

#[test]
fn pairs_and_maps_keep_their_shape() {
    let pair_type = json!({"Z1K1": "Z7", "Z7K1": "Z882", "Z882K1": "Z6", "Z882K2": "Z6"});
    let map = json!({
        "Z1K1": {"Z1K1": "Z7", "Z7K1": "Z883", "Z883K1": "Z6", "Z883K2": "Z6"},
        "K1": [pair_type, {"Z1K1": pair_type, "K1": "lang", "K2": "en"}]
    });
    let value = z(map.clone());
    assert_eq!(to_canonical(&value).to_json(), map);
    assert_eq!(to_canonical(&to_hybrid(&value)).to_json(), map);
    assert_eq!(to_canonical(&to_normal(&value)).to_json(), map);
}

#[test]
fn nested_lists_unroll_at_every_level() {
    let canonical = json!([
        {"Z1K1": "Z7", "Z7K1": "Z881", "Z881K1": "Z6"},
        ["Z6", "a"],
        ["Z6"]
    ]);
    let value = z(canonical.clone());
    let normal = to_normal(&value);
    assert_eq!(normal.to_json()["K1"]["K1"], s("a"));
    assert_eq!(to_canonical(&normal).to_json(), canonical);
}

#[test]
fn json_entry_points_pass_foreign_values_through() {
    assert_eq!(canonicalize_json(&Value::Null), None);
    assert_eq!(hybridize_json(&Value::Null), None);
    assert_eq!(normalize_json(&Value::Null), None);

    let foreign = json!({"Z1K1": "Z6", "Z6K1": 42});
    assert_eq!(canonicalize_json(&foreign), Some(foreign.clone()));
    assert_eq!(hybridize_json(&foreign), Some(foreign));

    assert_eq!(canonicalize_json(&s("x")), Some(json!("x")));
}

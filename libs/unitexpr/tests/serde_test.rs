//! Serialization of options and trees (requires the `serde` feature)

#![cfg(feature = "serde")]

use serde_json::json;
use unitexpr::{parse, ExprNode, SyntaxOptions};

#[test]
fn test_options_from_partial_config() {
    let options: SyntaxOptions =
        serde_json::from_value(json!({ "implicit_multiplication": true })).unwrap();
    assert!(options.implicit_multiplication);
    assert!(!options.caret_power);
    assert_eq!(options.max_depth, SyntaxOptions::default().max_depth);
}

#[test]
fn test_tree_survives_json() {
    let tree = parse("gram / meter ** 2").unwrap();
    let encoded = serde_json::to_string(&tree).unwrap();
    let decoded: ExprNode = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, tree);
    assert_eq!(decoded.to_string(), "gram / meter ** 2");
}

use modelforge_core::{ColumnDescriptor, derive_rules};

fn users_table() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "int").with_max_length(11).primary(),
        ColumnDescriptor::new("username", "varchar").with_max_length(100),
        ColumnDescriptor::new("balance", "decimal"),
        ColumnDescriptor::new("score", "double"),
        ColumnDescriptor::new("created_on", "datetime"),
    ]
}

#[test]
fn derives_rules_for_a_typical_table() {
    let rules = derive_rules(&users_table()).expect("rules for non-empty table");

    let summary: Vec<(&str, &str, &str)> = rules
        .iter()
        .map(|rule| (rule.field.as_str(), rule.label.as_str(), rule.rule_string()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("id", "Id", "integer|max_length[11]"),
            (
                "username",
                "Username",
                "alpha_numeric_spaces|xss_clean|max_length[100]"
            ),
            ("balance", "Balance", "decimal"),
            ("score", "Score", "numeric"),
            ("created_on", "Created On", ""),
        ]
    );
}

#[test]
fn serialized_rules_are_stable() {
    let rules = derive_rules(&users_table()[1..2]).expect("rules");
    let json = serde_json::to_string_pretty(&rules).expect("serialize rules");
    let expected = r#"[
  {
    "field": "username",
    "label": "Username",
    "constraints": [
      "alpha_numeric_spaces",
      "xss_clean",
      "max_length[100]"
    ],
    "rules": "alpha_numeric_spaces|xss_clean|max_length[100]"
  }
]"#;
    assert_eq!(json, expected);
}

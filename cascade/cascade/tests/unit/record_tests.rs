use cascade::{OptionRecord, OptionsResponse, ParentId};

#[test]
fn test_parse_numeric_and_string_ids() {
    let records =
        OptionsResponse::parse(r#"{"data":[{"id":1,"name":"HR"},{"id":"x-2","name":"Eng"}]}"#)
            .unwrap();
    assert_eq!(
        records,
        vec![OptionRecord::new("1", "HR"), OptionRecord::new("x-2", "Eng")]
    );
}

#[test]
fn test_parse_keeps_response_order() {
    let records =
        OptionsResponse::parse(r#"{"data":[{"id":3,"name":"C"},{"id":1,"name":"A"},{"id":2,"name":"B"}]}"#)
            .unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn test_parse_empty_data() {
    assert!(OptionsResponse::parse(r#"{"data":[]}"#).unwrap().is_empty());
}

#[test]
fn test_parse_missing_data_is_error() {
    assert!(OptionsResponse::parse(r#"{"rows":[]}"#).is_err());
    assert!(OptionsResponse::parse("<html>login</html>").is_err());
    assert!(OptionsResponse::parse(r#"{"data":[{"id":1}]}"#).is_err());
}

#[test]
fn test_parse_ignores_extra_fields() {
    let records =
        OptionsResponse::parse(r#"{"data":[{"id":1,"name":"HR","priority":2}],"total":1}"#)
            .unwrap();
    assert_eq!(records, vec![OptionRecord::new("1", "HR")]);
}

#[test]
fn test_parent_id_conversions() {
    assert_eq!(ParentId::from(5u64), ParentId::from("5"));
    assert_eq!(ParentId::from(String::from("7")).as_str(), "7");
    assert_eq!(ParentId::new("12").to_string(), "12");
    assert!(ParentId::new("").is_blank());
    assert!(ParentId::new("  ").is_blank());
    assert!(!ParentId::new("0").is_blank());
}

use crate::output::Report;

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{compare, CompareOptions, FileResult};
    use crate::output::aggregate;
    use crate::signature::parse;
    use serde_json::{json, Value};

    #[test]
    fn test_json_report_shape() {
        let original = parse("class User\n  def full_name: () -> String\nend\n").unwrap();
        let generated = parse("class User\n  def full_name: () -> (String | nil)\nend\n").unwrap();
        let diffs = compare(&original, &generated, CompareOptions::default());
        let report = aggregate(vec![FileResult::from_differences("user.rbs", diffs)]);

        let value: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(value["passed"], json!(false));
        assert_eq!(value["total"], json!(1));
        assert_eq!(value["failed_count"], json!(1));

        let result = &value["results"][0];
        assert_eq!(result["file"], json!("user.rbs"));
        assert_eq!(result["status"], json!("different"));
        assert!(result.get("message").is_none());

        let diff = &result["differences"][0];
        assert_eq!(diff["type"], json!("method_mismatch"));
        assert_eq!(diff["class"], json!("User"));
        assert_eq!(diff["member_type"], json!("method"));
        assert_eq!(diff["method"], json!("full_name"));
        assert_eq!(diff["original"]["overloads"][0]["return_type"], json!("String"));
        assert_eq!(
            diff["generated"]["overloads"][0]["return_type"],
            json!("String | nil")
        );
    }

    #[test]
    fn test_ok_results_omit_differences() {
        let report = aggregate(vec![FileResult::from_differences("a.rbs", vec![])]);
        let value: Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(value["passed"], json!(true));
        assert!(value["results"][0].get("differences").is_none());
    }
}

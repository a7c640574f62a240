use crate::error::Result;
use crate::rules::Finding;

/// Render findings as a JSON array, aggregation order preserved. The
/// payload is the bare finding list — consumers get exactly the model
/// fields, nothing wrapped around them.
pub fn render(findings: &[Finding]) -> Result<String> {
    let json = serde_json::to_string_pretty(findings)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::rules::Finding;

    #[test]
    fn finding_round_trips_field_for_field() {
        let original = Finding::new(
            "AZ-NSG-NSG_WORLD_SSH",
            "NSG",
            "test-rg/test-nsg/AllowSSH",
            "NSG_WORLD_SSH",
            "World access to 22",
        );

        let rendered = render(std::slice::from_ref(&original)).unwrap();
        let parsed: Vec<Finding> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec![original]);
    }

    #[test]
    fn empty_references_and_metadata_round_trip() {
        let original = Finding::new("X-Y-Z", "Storage", "acct", "UNMAPPED_RULE", "d");
        assert!(original.references.is_empty());
        assert!(original.metadata.is_empty());

        let rendered = render(std::slice::from_ref(&original)).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["references"], json!([]));
        assert_eq!(value[0]["metadata"], json!({}));

        let parsed: Vec<Finding> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec![original]);
    }

    #[test]
    fn field_names_and_scalar_types_are_verbatim() {
        let finding = Finding::new(
            "AZ-STG-PUBLIC-BLOB",
            "Storage",
            "prodstorageacct",
            "STG_PUBLIC_BLOB",
            "Public blob access enabled",
        )
        .with_metadata("port", json!(22));

        let rendered = render(&[finding]).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        let obj = value[0].as_object().unwrap();

        for field in [
            "id",
            "service",
            "resource",
            "rule",
            "description",
            "severity",
            "mitre",
            "cvss_score",
            "references",
            "metadata",
        ] {
            assert!(obj.contains_key(field), "missing field {field}");
        }
        assert!(obj["cvss_score"].is_number());
        assert_eq!(obj["cvss_score"], json!(9.1));
        assert_eq!(obj["severity"], json!("High"));
        assert_eq!(obj["metadata"]["port"], json!(22));
    }

    #[test]
    fn empty_report_is_an_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }
}

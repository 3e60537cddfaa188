use crate::Result;
use crate::resolve::FeatureRow;
use ohno::IntoAppError;
use std::io::Write;

/// Project feature rows as CSV with the columns
/// `@id,type,name,value,value_id,owner`, blank where unresolved.
pub fn generate<W: Write>(rows: &[FeatureRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer.serialize(row).into_app_err("failed to generate csv")?;
    }

    csv_writer.flush().into_app_err("failed to generate csv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, value: &str, value_id: &str) -> FeatureRow {
        FeatureRow {
            id: format!("id-{name}"),
            kind: "AttributeUsage".to_string(),
            name: name.to_string(),
            value: value.to_string(),
            value_id: value_id.to_string(),
            owner: "Part".to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![row("mass", "42", "lit-1"), row("label", "", "")];

        let mut output = Vec::new();
        generate(&rows, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "@id,type,name,value,value_id,owner");
        assert_eq!(lines[1], "id-mass,AttributeUsage,mass,42,lit-1,Part");
        assert_eq!(lines[2], "id-label,AttributeUsage,label,,,Part");
    }

    #[test]
    fn empty_batch_still_writes_nothing_but_succeeds() {
        let mut output = Vec::new();
        generate(&[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}

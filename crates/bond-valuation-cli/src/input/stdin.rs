use serde_json::Value;
use std::io::{self, Read};

/// Read a piped bond document from stdin, as JSON or else YAML.
/// Returns None when stdin is a terminal or carries nothing.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

fn parse_document(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str(trimmed)
            .map(Some)
            .map_err(|yaml_err| {
                format!("stdin is neither JSON ({json_err}) nor YAML ({yaml_err})").into()
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_none() {
        assert!(parse_document("  \n").unwrap().is_none());
    }

    #[test]
    fn test_json_document() {
        let value = parse_document(r#"{"principal_amount": 500}"#).unwrap().unwrap();
        assert_eq!(value["principal_amount"], 500);
    }

    #[test]
    fn test_yaml_document() {
        let value = parse_document("principal_amount: 500\npayment_frequency: quarterly\n")
            .unwrap()
            .unwrap();
        assert_eq!(value["payment_frequency"], "quarterly");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse_document("{ not: [valid").is_err());
    }
}

use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Projects a collection to CSV. Headers come from the first record's
/// fields in declaration order, every cell is double-quoted with inner
/// quotes doubled, and nested objects or arrays flatten to their compact
/// JSON form. An empty collection yields an empty document.
pub fn to_csv<T: Serialize>(rows: &[T]) -> AppResult<String> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::to_value(row).map_err(anyhow::Error::from)? {
            Value::Object(map) => records.push(map),
            _ => {
                return Err(AppError::InvalidInput(
                    "Only record collections export to CSV".into(),
                ));
            }
        }
    }

    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| quote(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in &records {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| quote(&cell_text(record.get(header))))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// Scalars render bare (no JSON string quotes); null and absent fields
/// render empty; anything structured keeps its JSON spelling.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

use crate::errors::ScanlensError;
use crate::models::{ReportTable, Scalar};

/// Read a CSV export with a header row. Every cell is kept as text; empty
/// cells are left out of the record.
pub fn read_csv_table(content: &str) -> Result<ReportTable, ScanlensError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = ReportTable::with_columns(headers.iter().cloned());

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(ScanlensError::InvalidInput(format!(
                "CSV row {} has {} cells but the header has {}",
                i + 1,
                record.len(),
                headers.len()
            )));
        }
        let row = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(h, cell)| (h.clone(), Scalar::from(cell)))
            .collect();
        table.push(row, None);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_header_and_rows() {
        let csv = "Resource type,Region,AWS Account\nAWS::EC2::Instance,us-east-1,012345678901\nAWS::S3::Bucket,,012345678901\n";
        let table = read_csv_table(csv).unwrap();
        assert_eq!(table.columns(), &["Resource type", "Region", "AWS Account"]);
        assert_eq!(table.len(), 2);
        let first = &table.rows()[0].record;
        assert_eq!(first.text("AWS Account").as_deref(), Some("012345678901"));
        assert!(!table.rows()[1].record.contains_key("Region"));
    }

    #[test]
    fn test_quoted_cells() {
        let csv = "Name,Tags\n\"web, prod\",\"a=\"\"b\"\"\"\n";
        let table = read_csv_table(csv).unwrap();
        let row = &table.rows()[0].record;
        assert_eq!(row.text("Name").as_deref(), Some("web, prod"));
        assert_eq!(row.text("Tags").as_deref(), Some("a=\"b\""));
    }

    #[test]
    fn test_short_rows_are_allowed() {
        let table = read_csv_table("a,b,c\n1,2\n").unwrap();
        assert_eq!(table.rows()[0].record.len(), 2);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = read_csv_table("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ScanlensError::InvalidInput(ref m) if m.contains("row 1")));
    }
}

use contracts::usecases::common::{UseCaseError, UseCaseResult};
use std::collections::HashMap;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Одна строка данных CSV с номером строки в исходном файле (с 1, без заголовка)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub row: usize,
    values: HashMap<String, String>,
}

impl CsvRecord {
    /// Непустое значение колонки; `key` в любом написании (`teamName`, `team_name`)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&normalize_header(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Значение колонки или пустая строка
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    pub records: Vec<CsvRecord>,
}

impl CsvTable {
    pub fn has_column(&self, key: &str) -> bool {
        let key = normalize_header(key);
        self.headers.iter().any(|h| *h == key)
    }

    /// Ошибка, если нет ни одной из перечисленных колонок
    pub fn require_any(&self, keys: &[&str]) -> UseCaseResult<()> {
        if keys.iter().any(|k| self.has_column(k)) {
            return Ok(());
        }
        Err(UseCaseError::validation(format!(
            "Missing required column: {}",
            keys.join(" or ")
        )))
    }
}

/// `teamName`, `team_name`, ` Team Name ` → `teamname`
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Разбор CSV: первая строка — заголовок, значения обрезаются по краям.
///
/// Строки, где все ячейки пусты, пропускаются, но занимают свой номер.
pub fn read_csv(bytes: &[u8], max_rows: usize) -> UseCaseResult<CsvTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(UseCaseError::validation("CSV file is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(UseCaseError::validation("CSV file is empty."));
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(&e))?;

        let mut values = HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            // При повторяющемся заголовке берётся первая колонка
            values
                .entry(header.clone())
                .or_insert_with(|| value.to_string());
        }

        let record = CsvRecord {
            row: index + 1,
            values,
        };
        if record.is_blank() {
            continue;
        }
        if records.len() == max_rows {
            return Err(UseCaseError::validation(format!(
                "CSV exceeds the maximum of {} rows.",
                max_rows
            )));
        }
        records.push(record);
    }

    Ok(CsvTable { headers, records })
}

fn csv_error(err: &csv::Error) -> UseCaseError {
    let location = err
        .position()
        .map(|p| format!(" (line {})", p.line()))
        .unwrap_or_default();
    UseCaseError::validation(format!("Malformed CSV{}: {}", location, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("teamName"), "teamname");
        assert_eq!(normalize_header(" team_name "), "teamname");
        assert_eq!(normalize_header("Team Name"), "teamname");
        assert_eq!(normalize_header("player-id"), "playerid");
    }

    #[test]
    fn test_read_rows_with_numbers() {
        let csv = "teamName,teamId\nU12 Hawks,\n , \nU14 Falcons,abc\n";
        let table = read_csv(csv.as_bytes(), 1000).unwrap();
        assert!(table.has_column("team_name"));
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].row, 1);
        assert_eq!(table.records[0].get("teamName"), Some("U12 Hawks"));
        assert_eq!(table.records[0].get("teamId"), None);
        // blank row 2 is skipped but keeps its number
        assert_eq!(table.records[1].row, 3);
        assert_eq!(table.records[1].text("teamId"), "abc");
    }

    #[test]
    fn test_bom_and_short_rows() {
        let csv = "\u{feff}name,email,teamName\nSam Lee\n";
        let table = read_csv(csv.as_bytes(), 10).unwrap();
        assert!(table.has_column("name"));
        assert_eq!(table.records[0].get("name"), Some("Sam Lee"));
        assert_eq!(table.records[0].get("email"), None);
    }

    #[test]
    fn test_empty_file() {
        let err = read_csv(b"", 10).unwrap_err();
        assert_eq!(err.message, "CSV file is empty.");
        let err = read_csv(b" \n\n", 10).unwrap_err();
        assert_eq!(err.message, "CSV file is empty.");
    }

    #[test]
    fn test_header_only_file_has_no_records() {
        let table = read_csv(b"teamName\n", 10).unwrap();
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_row_limit() {
        let csv = "teamName\nA\nB\nC\n";
        assert!(read_csv(csv.as_bytes(), 3).is_ok());
        let err = read_csv(csv.as_bytes(), 2).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message, "CSV exceeds the maximum of 2 rows.");
    }

    #[test]
    fn test_require_any() {
        let table = read_csv(b"name,teamName\nSam,U12\n", 10).unwrap();
        assert!(table.require_any(&["teamId", "teamName"]).is_ok());
        let err = table.require_any(&["email"]).unwrap_err();
        assert_eq!(err.message, "Missing required column: email");
    }

    #[test]
    fn test_quoted_values() {
        let csv = "teamName\n\"Hawks, Under 12\"\n";
        let table = read_csv(csv.as_bytes(), 10).unwrap();
        assert_eq!(table.records[0].get("teamName"), Some("Hawks, Under 12"));
    }
}

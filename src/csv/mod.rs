//! CSV codec
//!
//! Line-oriented, comma-separated, RFC-4180-ish. Parsing is deliberately
//! forgiving: it never fails, and unbalanced quotes degrade to best-effort
//! cell boundaries rather than an error.

use smallvec::SmallVec;

use crate::text::dedup_preserving;

/// One table row. Annotated tables are a handful of columns wide, so cells
/// are stored inline.
pub type Row = SmallVec<[String; 4]>;

/// Split raw CSV text into rows.
///
/// One row is produced per input line, including a trailing empty row when
/// the input ends with a newline; callers tolerate or filter empties. A
/// comma is a delimiter only when the remainder of its line contains an
/// even number of double quotes, which keeps commas inside quoted fields
/// intact. Lines with unbalanced quotes split at whatever boundaries that
/// rule yields.
///
/// Each cell has every double quote removed and is trimmed.
pub fn parse(raw: &str) -> Vec<Row> {
    raw.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> Row {
    let total_quotes = line.matches('"').count();
    let mut quotes_seen = 0;
    let mut cells = Row::new();
    let mut field = String::new();

    for ch in line.chars() {
        match ch {
            '"' => {
                quotes_seen += 1;
                field.push(ch);
            }
            // Delimiter only when the rest of the line has balanced quotes.
            ',' if (total_quotes - quotes_seen) % 2 == 0 => {
                cells.push(clean_cell(&field));
                field.clear();
            }
            _ => field.push(ch),
        }
    }
    cells.push(clean_cell(&field));

    cells
}

fn clean_cell(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|&c| c != '"').collect();
    stripped.trim().to_string()
}

/// Serialize rows back to CSV text.
///
/// Duplicate cell values within a row collapse to a single field, first
/// occurrence kept (see [`dedup_preserving`]). Every field is wrapped in
/// double quotes with embedded quotes doubled. Rows are joined with `\n`
/// and there is no trailing newline.
pub fn serialize(rows: &[Row]) -> String {
    rows.iter()
        .map(|row| serialize_row(row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_row(row: &Row) -> String {
    dedup_preserving(row.iter().cloned())
        .iter()
        .map(|cell| quote_field(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let rows = parse("a,b,c\nd,e,f");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row(&["a", "b", "c"]));
        assert_eq!(rows[1], row(&["d", "e", "f"]));
    }

    #[test]
    fn test_parse_quoted_comma_is_not_a_delimiter() {
        let rows = parse("a,\"b,c\",d");
        assert_eq!(rows, vec![row(&["a", "b,c", "d"])]);
    }

    #[test]
    fn test_parse_strips_quotes_and_trims() {
        let rows = parse("  \"hello\" , \" spaced \" ");
        assert_eq!(rows, vec![row(&["hello", "spaced"])]);
    }

    #[test]
    fn test_parse_trailing_newline_yields_empty_row() {
        let rows = parse("a,b\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row(&[""]));
    }

    #[test]
    fn test_parse_empty_input() {
        let rows = parse("");
        assert_eq!(rows, vec![row(&[""])]);
    }

    #[test]
    fn test_parse_unbalanced_quotes_does_not_panic() {
        // Undefined boundaries, but still one row and no failure.
        let rows = parse("a,\"b,c");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_serialize_quotes_every_field() {
        let csv = serialize(&[row(&["a", "b"])]);
        assert_eq!(csv, "\"a\",\"b\"");
    }

    #[test]
    fn test_serialize_doubles_embedded_quotes() {
        let csv = serialize(&[row(&["say \"hi\""])]);
        assert_eq!(csv, "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_serialize_dedups_within_row() {
        let csv = serialize(&[row(&["a", "a", "b"])]);
        assert_eq!(csv, "\"a\",\"b\"");
    }

    #[test]
    fn test_serialize_no_trailing_newline() {
        let csv = serialize(&[row(&["a"]), row(&["b"])]);
        assert_eq!(csv, "\"a\"\n\"b\"");
    }

    #[test]
    fn test_round_trip_up_to_trimming() {
        let text = "name,age\n alice ,30\nbob,41";
        let once = parse(text);
        let again = parse(&serialize(&once));
        assert_eq!(once, again);
    }

    #[test]
    fn test_row_inline_capacity() {
        let r: Row = smallvec!["a".to_string(), "b".to_string()];
        assert!(!r.spilled());
    }
}

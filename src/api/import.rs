//! CSV import
//!
//! `GET /import` serves the upload form; `POST /import` accepts a
//! multipart CSV upload and appends one game row per usable input row.
//!
//! The parser is deliberately forgiving: it accepts our own export, files
//! re-saved by Excel (CP949, semicolons), and hand-edited sheets with
//! either English or Korean headers. Unlike the JSON create path, blank
//! names are tolerated and unparseable scores default to zero; only rows
//! with no resolvable name at all are dropped.

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};
use csv::StringRecord;
use tracing::info;

use crate::db::games;
use crate::{time, ApiError, ApiResult, AppState};

const IMPORT_HTML: &str = include_str!("../ui/import.html");

/// Accepted header spellings per logical field, checked in order: the
/// English machine-readable name first, then the Korean display names
/// (with and without the space).
const TIME_ALIASES: [&str; 2] = ["created_at", "시간"];

const NAME_ALIASES: [[&str; 3]; 4] = [
    ["player1_name", "P1 이름", "P1이름"],
    ["player2_name", "P2 이름", "P2이름"],
    ["player3_name", "P3 이름", "P3이름"],
    ["player4_name", "P4 이름", "P4이름"],
];

const SCORE_ALIASES: [[&str; 3]; 4] = [
    ["player1_score", "P1 점수", "P1점수"],
    ["player2_score", "P2 점수", "P2점수"],
    ["player3_score", "P3 점수", "P3점수"],
    ["player4_score", "P4 점수", "P4점수"],
];

/// GET /import
///
/// Upload page (presentational).
pub async fn import_form() -> Html<&'static str> {
    Html(IMPORT_HTML)
}

/// POST /import
///
/// Multipart field `file`. Decodes, sniffs the delimiter, resolves
/// headers, and appends rows best-effort; on success redirects to the
/// landing page. Decode failures return 400 with a plain-text message.
pub async fn import_games(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let mut raw: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(format!("unreadable upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadUpload(format!("unreadable upload: {}", e)))?;
            raw = Some(bytes.to_vec());
            break;
        }
    }

    let raw = raw.ok_or_else(|| ApiError::BadUpload("no file uploaded".to_string()))?;

    let text = decode_upload(&raw).ok_or_else(|| {
        ApiError::BadUpload("unknown encoding; save the file as UTF-8 or CP949".to_string())
    })?;

    let delimiter = sniff_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| ApiError::BadUpload(format!("unreadable CSV header: {}", e)))?
        .clone();

    let mut inserted = 0u64;
    for record in reader.records() {
        // Best-effort: a row the parser cannot read is skipped, not fatal
        let Ok(record) = record else { continue };

        let created_at = pick(&headers, &record, &TIME_ALIASES)
            .map(str::to_string)
            .unwrap_or_else(time::now_minute);

        let mut names: [String; 4] = Default::default();
        for i in 0..4 {
            names[i] = pick(&headers, &record, &NAME_ALIASES[i])
                .unwrap_or("")
                .to_string();
        }

        // A row with no name in any seat is unmappable; drop it
        if names.iter().all(|name| name.is_empty()) {
            continue;
        }

        let mut scores = [0i64; 4];
        for i in 0..4 {
            scores[i] = pick(&headers, &record, &SCORE_ALIASES[i])
                .map(parse_score_lenient)
                .unwrap_or(0);
        }

        games::insert_game(&state.db, &created_at, &names, &scores).await?;
        inserted += 1;
    }

    info!("import: inserted {} rows", inserted);

    Ok(Redirect::to("/"))
}

/// Decode the upload, trying UTF-8 with BOM, plain UTF-8, then EUC-KR.
///
/// Returns `None` when every decoding reports errors.
fn decode_upload(raw: &[u8]) -> Option<String> {
    let stripped = raw.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(raw);
    if let Ok(text) = std::str::from_utf8(stripped) {
        return Some(text.to_string());
    }

    let (text, had_errors) = encoding_rs::EUC_KR.decode_without_bom_handling(raw);
    if !had_errors {
        return Some(text.into_owned());
    }

    None
}

/// Sniff the field delimiter from the first five lines: `,` or `;`,
/// defaulting to `,`.
fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text.lines().take(5).collect();
    let commas: usize = sample.iter().map(|line| line.matches(',').count()).sum();
    let semicolons: usize = sample.iter().map(|line| line.matches(';').count()).sum();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// First present, non-empty value among the candidate headers
fn pick<'a>(headers: &StringRecord, record: &'a StringRecord, keys: &[&str]) -> Option<&'a str> {
    for key in keys {
        if let Some(idx) = headers.iter().position(|header| header == *key) {
            if let Some(value) = record.get(idx) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Parse a score permissively: integer, else float truncated toward
/// zero, else 0. Import never rejects a row over a bad score.
fn parse_score_lenient(value: &str) -> i64 {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return f as i64;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_utf8() {
        assert_eq!(decode_upload("ID,시간".as_bytes()).as_deref(), Some("ID,시간"));
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice("ID,시간".as_bytes());
        assert_eq!(decode_upload(&raw).as_deref(), Some("ID,시간"));
    }

    #[test]
    fn test_decode_euc_kr() {
        let (encoded, _, _) = encoding_rs::EUC_KR.encode("P1 이름,P1 점수");
        let decoded = decode_upload(&encoded).expect("EUC-KR upload should decode");
        assert_eq!(decoded, "P1 이름,P1 점수");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        // 0xFF is not a valid lead byte in UTF-8 or EUC-KR
        assert_eq!(decode_upload(&[0xFF, 0xFF, 0xFF]), None);
    }

    #[test]
    fn test_sniff_comma_default() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("no delimiters here"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
    }

    #[test]
    fn test_sniff_uses_first_five_lines_only() {
        let text = "a,b\n1,2\n3,4\n5,6\n7,8\n9;9;9;9;9;9;9;9\n";
        assert_eq!(sniff_delimiter(text), b',');
    }

    #[test]
    fn test_pick_priority_order() {
        let headers = StringRecord::from(vec!["P1 이름", "player1_name"]);
        let record = StringRecord::from(vec!["철수", "Cheolsu"]);
        // English machine name wins over the Korean display name
        assert_eq!(pick(&headers, &record, &NAME_ALIASES[0]), Some("Cheolsu"));
    }

    #[test]
    fn test_pick_skips_empty_values() {
        let headers = StringRecord::from(vec!["player1_name", "P1 이름"]);
        let record = StringRecord::from(vec!["", "철수"]);
        assert_eq!(pick(&headers, &record, &NAME_ALIASES[0]), Some("철수"));
    }

    #[test]
    fn test_pick_missing_column() {
        let headers = StringRecord::from(vec!["ID", "시간"]);
        let record = StringRecord::from(vec!["1", "2025-11-19T05:30"]);
        assert_eq!(pick(&headers, &record, &NAME_ALIASES[0]), None);
    }

    #[test]
    fn test_pick_tolerates_short_rows() {
        let headers = StringRecord::from(vec!["player1_name", "player1_score"]);
        let record = StringRecord::from(vec!["철수"]);
        assert_eq!(pick(&headers, &record, &SCORE_ALIASES[0]), None);
    }

    #[test]
    fn test_parse_score_lenient() {
        assert_eq!(parse_score_lenient("25000"), 25000);
        assert_eq!(parse_score_lenient(" 25000 "), 25000);
        assert_eq!(parse_score_lenient("25000.9"), 25000);
        assert_eq!(parse_score_lenient("-1500"), -1500);
        assert_eq!(parse_score_lenient("abc"), 0);
        assert_eq!(parse_score_lenient(""), 0);
        assert_eq!(parse_score_lenient("nan"), 0);
        assert_eq!(parse_score_lenient("inf"), 0);
    }
}

use crate::translation::contains_hangul;

/// Splits decoded text into lines, keeping terminators.
///
/// `\r\n` becomes `\n`. A last line without a terminator stays without one.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n')
        .map(|line| {
            line.strip_suffix("\r\n")
                .map_or_else(|| line.to_string(), |body| format!("{body}\n"))
        })
        .collect()
}

/// A line eligible for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub text: &'a str,
}

/// Returns the id and Korean text of `line` if its second tab field
/// contains Hangul.
pub fn parse_candidate(line: &str) -> Option<Candidate<'_>> {
    let body = line.strip_suffix('\n').unwrap_or(line);
    let mut fields = body.split('\t');
    let id = fields.next()?;
    let text = fields.next()?;

    contains_hangul(text).then_some(Candidate { id, text })
}

/// Output line for a translated record. Trailing fields are not kept.
pub fn format_translated(id: &str, translated: &str) -> String {
    format!("{id}\t{translated}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_terminators() {
        assert_eq!(
            split_lines("1\t가\n2\tb\n3\tc"),
            vec!["1\t가\n", "2\tb\n", "3\tc"]
        );
    }

    #[test]
    fn test_split_lines_normalizes_crlf() {
        assert_eq!(split_lines("1\t가\r\n2\tb\r\n"), vec!["1\t가\n", "2\tb\n"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_parse_candidate() {
        assert_eq!(
            parse_candidate("42\t안녕하세요\n"),
            Some(Candidate {
                id: "42",
                text: "안녕하세요"
            })
        );
    }

    #[test]
    fn test_parse_candidate_with_extra_fields() {
        assert_eq!(
            parse_candidate("M100\t모터 기동\tBOOL\t%MX0.1\n"),
            Some(Candidate {
                id: "M100",
                text: "모터 기동"
            })
        );
    }

    #[test]
    fn test_parse_candidate_rejects_non_korean() {
        assert_eq!(parse_candidate("7\tHello world\n"), None);
        assert_eq!(parse_candidate("안녕하세요\n"), None);
        assert_eq!(parse_candidate("\n"), None);
        assert_eq!(parse_candidate("8\tStop\t정지\n"), None);
    }

    #[test]
    fn test_format_translated() {
        assert_eq!(format_translated("42", "Hello"), "42\tHello\n");
    }
}

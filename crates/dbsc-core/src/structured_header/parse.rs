//! RFC 8941 §4.2 parsing algorithms for Lists.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{BareItem, InnerList, Item, List, ListEntry, Parameters};

const MAX_INTEGER_DIGITS: usize = 15;
const MAX_DECIMAL_INTEGER_DIGITS: usize = 12;
const MAX_DECIMAL_FRACTION_DIGITS: usize = 3;

/// Input that does not match the structured-header List grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid structured header at byte {offset}: {reason}")]
pub struct ParseError {
    pub offset: usize,
    pub reason: &'static str,
}

/// Parses a header field value as a structured-header List.
///
/// An empty (or all-space) value is an empty list.
pub fn parse_list(input: &str) -> Result<List, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_sp();
    let list = parser.list()?;
    parser.skip_sp();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(list)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: &'static str) -> ParseError {
        ParseError {
            offset: self.pos,
            reason,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_sp(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn skip_ows(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn list(&mut self) -> Result<List, ParseError> {
        let mut members = Vec::new();
        while !self.at_end() {
            members.push(self.item_or_inner_list()?);
            self.skip_ows();
            if self.at_end() {
                return Ok(members);
            }
            if self.peek() != Some(b',') {
                return Err(self.error("expected ',' between list members"));
            }
            self.pos += 1;
            self.skip_ows();
            if self.at_end() {
                return Err(self.error("trailing ',' in list"));
            }
        }
        Ok(members)
    }

    fn item_or_inner_list(&mut self) -> Result<ListEntry, ParseError> {
        if self.peek() == Some(b'(') {
            self.inner_list().map(ListEntry::InnerList)
        } else {
            self.item().map(ListEntry::Item)
        }
    }

    fn inner_list(&mut self) -> Result<InnerList, ParseError> {
        self.pos += 1; // '('
        let mut items = Vec::new();
        while !self.at_end() {
            self.skip_sp();
            if self.peek() == Some(b')') {
                self.pos += 1;
                let params = self.parameters()?;
                return Ok(InnerList { items, params });
            }
            items.push(self.item()?);
            if !matches!(self.peek(), Some(b' ' | b')')) {
                return Err(self.error("expected ' ' or ')' in inner list"));
            }
        }
        Err(self.error("unterminated inner list"))
    }

    fn item(&mut self) -> Result<Item, ParseError> {
        let bare_item = self.bare_item()?;
        let params = self.parameters()?;
        Ok(Item { bare_item, params })
    }

    fn bare_item(&mut self) -> Result<BareItem, ParseError> {
        match self.peek() {
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(b'"') => self.string().map(BareItem::String),
            Some(b'*' | b'A'..=b'Z' | b'a'..=b'z') => self.token().map(BareItem::Token),
            Some(b':') => self.byte_sequence().map(BareItem::ByteSequence),
            Some(b'?') => self.boolean().map(BareItem::Boolean),
            Some(_) => Err(self.error("unrecognized item type")),
            None => Err(self.error("expected an item")),
        }
    }

    fn parameters(&mut self) -> Result<Parameters, ParseError> {
        let mut params = Parameters::new();
        while self.peek() == Some(b';') {
            self.pos += 1;
            self.skip_sp();
            let key = self.key()?;
            let value = if self.peek() == Some(b'=') {
                self.pos += 1;
                self.bare_item()?
            } else {
                BareItem::Boolean(true)
            };
            params.insert(key, value);
        }
        Ok(params)
    }

    fn key(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(b'a'..=b'z' | b'*') => {}
            _ => return Err(self.error("parameter key must start with lcalpha or '*'")),
        }
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'*')
        ) {
            self.pos += 1;
        }
        Ok(self.slice(start))
    }

    fn number(&mut self) -> Result<BareItem, ParseError> {
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.error("expected digit"));
        }

        let start = self.pos;
        let mut dot: Option<usize> = None;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => self.pos += 1,
                b'.' if dot.is_none() => {
                    if self.pos - start > MAX_DECIMAL_INTEGER_DIGITS {
                        return Err(self.error("decimal integer part too long"));
                    }
                    dot = Some(self.pos);
                    self.pos += 1;
                }
                _ => break,
            }
            let len = self.pos - start;
            if dot.is_none() && len > MAX_INTEGER_DIGITS {
                return Err(self.error("integer too long"));
            }
            if dot.is_some() && len > MAX_DECIMAL_INTEGER_DIGITS + 1 + MAX_DECIMAL_FRACTION_DIGITS {
                return Err(self.error("decimal too long"));
            }
        }

        let digits = self.slice(start);
        match dot {
            None => {
                let magnitude: i64 = digits
                    .parse()
                    .map_err(|_| self.error("invalid integer"))?;
                Ok(BareItem::Integer(if negative { -magnitude } else { magnitude }))
            }
            Some(dot_pos) => {
                let fraction_len = self.pos - dot_pos - 1;
                if fraction_len == 0 {
                    return Err(self.error("decimal ends with '.'"));
                }
                if fraction_len > MAX_DECIMAL_FRACTION_DIGITS {
                    return Err(self.error("decimal fraction too long"));
                }
                let magnitude: f64 = digits
                    .parse()
                    .map_err(|_| self.error("invalid decimal"))?;
                Ok(BareItem::Decimal(if negative { -magnitude } else { magnitude }))
            }
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.pos += 1; // '"'
        let mut out = String::new();
        loop {
            match self.next() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => return Ok(out),
                Some(b'\\') => match self.next() {
                    Some(c @ (b'"' | b'\\')) => out.push(c as char),
                    _ => return Err(self.error("invalid escape in string")),
                },
                Some(c @ 0x20..=0x7e) => out.push(c as char),
                Some(_) => return Err(self.error("non-printable character in string")),
            }
        }
    }

    fn token(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1; // ALPHA or '*', checked by caller
        while matches!(self.peek(), Some(c) if is_tchar(c) || c == b':' || c == b'/') {
            self.pos += 1;
        }
        Ok(self.slice(start))
    }

    fn byte_sequence(&mut self) -> Result<Vec<u8>, ParseError> {
        self.pos += 1; // ':'
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                b':' => {
                    let encoded = &input[start..self.pos];
                    self.pos += 1;
                    return STANDARD
                        .decode(encoded)
                        .map_err(|_| self.error("invalid base64 in byte sequence"));
                }
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' | b'=' => self.pos += 1,
                _ => return Err(self.error("invalid character in byte sequence")),
            }
        }
        Err(self.error("unterminated byte sequence"))
    }

    fn boolean(&mut self) -> Result<bool, ParseError> {
        self.pos += 1; // '?'
        match self.next() {
            Some(b'1') => Ok(true),
            Some(b'0') => Ok(false),
            _ => Err(self.error("boolean must be ?0 or ?1")),
        }
    }

    /// Bytes from `start` to the cursor. Only called on ASCII runs.
    fn slice(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}

fn is_tchar(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner(entry: &ListEntry) -> &InnerList {
        match entry {
            ListEntry::InnerList(inner) => inner,
            other => panic!("expected inner list, got {other:?}"),
        }
    }

    #[test]
    fn parses_registration_member() {
        let list = parse_list(r#"(RS256 ES256);path="start";challenge="code""#).unwrap();
        assert_eq!(list.len(), 1);
        let member = inner(&list[0]);
        let tokens: Vec<_> = member
            .items
            .iter()
            .filter_map(|i| i.bare_item.as_token())
            .collect();
        assert_eq!(tokens, ["RS256", "ES256"]);
        assert_eq!(
            member.params.get("path"),
            Some(&BareItem::String("start".into()))
        );
        assert_eq!(
            member.params.get("challenge"),
            Some(&BareItem::String("code".into()))
        );
    }

    #[test]
    fn empty_input_is_empty_list() {
        assert!(parse_list("").unwrap().is_empty());
        assert!(parse_list("   ").unwrap().is_empty());
    }

    #[test]
    fn multiple_members_with_ows() {
        let list = parse_list("(a);x=1 ,\t(b c), tok;flag").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(inner(&list[1]).items.len(), 2);
        match &list[2] {
            ListEntry::Item(item) => {
                assert_eq!(item.bare_item.as_token(), Some("tok"));
                assert_eq!(item.params.get("flag"), Some(&BareItem::Boolean(true)));
            }
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn empty_inner_list() {
        let list = parse_list("();path=\"/\"").unwrap();
        assert!(inner(&list[0]).items.is_empty());
    }

    #[test]
    fn bare_item_types() {
        let list = parse_list(r#"42, -7, 3.25, "s\"q\\", tok/x:y, :aGVsbG8=:, ?0, ?1"#).unwrap();
        let items: Vec<_> = list
            .iter()
            .map(|e| match e {
                ListEntry::Item(i) => i.bare_item.clone(),
                other => panic!("expected item, got {other:?}"),
            })
            .collect();
        assert_eq!(
            items,
            vec![
                BareItem::Integer(42),
                BareItem::Integer(-7),
                BareItem::Decimal(3.25),
                BareItem::String("s\"q\\".into()),
                BareItem::Token("tok/x:y".into()),
                BareItem::ByteSequence(b"hello".to_vec()),
                BareItem::Boolean(false),
                BareItem::Boolean(true),
            ]
        );
    }

    #[test]
    fn duplicate_parameter_last_wins_in_first_position() {
        let list = parse_list(r#"(A);a="1";b="2";a="3""#).unwrap();
        let params = &inner(&list[0]).params;
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(params.get("a"), Some(&BareItem::String("3".into())));
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(parse_list("(a), ").is_err());
        assert!(parse_list("a,").is_err());
    }

    #[test]
    fn rejects_unterminated_constructs() {
        assert!(parse_list("(a b").is_err());
        assert!(parse_list("\"open").is_err());
        assert!(parse_list(":aGVs").is_err());
    }

    #[test]
    fn rejects_bad_keys_and_escapes() {
        assert!(parse_list("(a);Path=\"x\"").is_err());
        assert!(parse_list(r#""bad\n""#).is_err());
        assert!(parse_list("\"tab\there\"").is_err());
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(parse_list("1234567890123456").is_err());
        assert!(parse_list("1234567890123.5").is_err());
        assert!(parse_list("1.2345").is_err());
        assert!(parse_list("1.").is_err());
        assert!(parse_list("-").is_err());
        assert!(parse_list("123456789012345").is_ok());
    }

    #[test]
    fn rejects_missing_separator() {
        let err = parse_list("(a)(b)").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(parse_list("(é)").is_err());
        assert!(parse_list("\"caf\u{e9}\"").is_err());
    }
}

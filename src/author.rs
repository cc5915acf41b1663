//! Best-effort split of `"email (Display Name)"` author strings.
//!
//! RSS carries authors as one free-text field while Atom wants separate
//! `name` and `email` elements. The parser is a single naive pass: no
//! RFC 5322 mailbox grammar, no quoting, no escapes.

/// Author fields derived from a combined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    /// Parse `raw` into name and email.
    ///
    /// - empty input gives an empty author
    /// - no `@` past the first character: the whole string is the name
    /// - otherwise the email runs up to the first space or `(`, and the name
    ///   sits inside the parentheses closed by the first `)`
    /// - if both come out empty the whole string becomes the name
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        let mut author = if has_email(raw) {
            Self {
                name: extract_name(raw).to_string(),
                email: extract_email(raw).to_string(),
            }
        } else {
            Self {
                name: raw.to_string(),
                email: String::new(),
            }
        };

        if author.is_empty() {
            author.name = raw.to_string();
        }
        author
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// A leading `@` does not count as an address.
fn has_email(s: &str) -> bool {
    s.find('@').is_some_and(|at| at > 0)
}

fn extract_email(s: &str) -> &str {
    s.find([' ', '(']).map_or(s, |end| &s[..end])
}

/// Text between the last `(` seen before the first `)` and that `)`.
fn extract_name(s: &str) -> &str {
    let mut start = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => start = Some(i + 1),
            ')' => {
                return match start {
                    Some(start) if i > start => &s[start..i],
                    _ => "",
                };
            }
            _ => {}
        }
    }
    ""
}

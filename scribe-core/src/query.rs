//! Local search query matching.
//!
//! Grammar: `field:pattern [AND field:pattern ...]`. Patterns use `*` and `?`
//! wildcards. `*:*` matches every document. A field that is missing from the
//! document never matches; non-string fields are compared by their JSON text.

use anyhow::bail;
use scribe_types::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    field: String,
    pattern: String,
}

impl Query {
    pub fn parse(query: &str) -> anyhow::Result<Self> {
        let mut terms = Vec::new();
        for raw in query.split(" AND ") {
            let raw = raw.trim();
            let Some((field, pattern)) = raw.split_once(':') else {
                bail!("invalid query term `{raw}`: expected field:pattern");
            };
            if field.is_empty() {
                bail!("invalid query term `{raw}`: empty field");
            }
            terms.push(Term {
                field: field.to_string(),
                pattern: pattern.to_string(),
            });
        }
        Ok(Self { terms })
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.terms.iter().all(|t| t.matches(doc))
    }
}

impl Term {
    fn matches(&self, doc: &Document) -> bool {
        if self.field == "*" {
            if self.pattern == "*" {
                return true;
            }
            return doc
                .as_object()
                .is_some_and(|map| map.values().any(|v| glob_match(&self.pattern, &field_text(v))));
        }
        match doc.get(&self.field) {
            Some(value) => glob_match(&self.pattern, &field_text(value)),
            None => false,
        }
    }
}

fn field_text(value: &Document) -> String {
    match value {
        Document::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Wildcard matcher: `*` and `?`.
pub fn glob_match(pat: &str, text: &str) -> bool {
    let p: Vec<char> = pat.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == '*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                '*' => dp[i - 1][j] || dp[i][j - 1],
                '?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

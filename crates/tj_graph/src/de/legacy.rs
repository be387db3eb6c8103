//! A literal-only reader for legacy `module/expression` payloads.
//!
//! Only calls of the form `callee(arg, ...)` are understood, where every
//! argument is a string, number, `True`, `False` or `None` literal. Nothing
//! is ever evaluated.

use crate::graph::Value;

/// A parsed `module/callee(args)` payload.
#[derive(Debug, PartialEq)]
pub(crate) struct LegacyCall<'a> {
    pub module: &'a str,
    pub callee: &'a str,
    pub args: Vec<Value>,
}

/// Parses `repr`, returning `None` for anything but a literal call.
pub(crate) fn parse_repr(repr: &str) -> Option<LegacyCall<'_>> {
    let (module, expr) = repr.split_once('/')?;
    let expr = expr.trim();
    let open = expr.find('(')?;
    let inner = expr.strip_suffix(')')?.get(open + 1..)?;
    let callee = expr[..open].trim();
    if !callee.split('.').all(is_identifier) {
        return None;
    }
    let args = Literals { src: inner, pos: 0 }.parse_all()?;
    Some(LegacyCall {
        module: module.trim(),
        callee,
        args,
    })
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

struct Literals<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Literals<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_all(mut self) -> Option<Vec<Value>> {
        let mut args = Vec::new();
        self.skip_whitespace();
        while self.peek().is_some() {
            args.push(self.literal()?);
            self.skip_whitespace();
            match self.bump() {
                None => break,
                Some(',') => self.skip_whitespace(),
                Some(_) => return None,
            }
        }
        Some(args)
    }

    fn literal(&mut self) -> Option<Value> {
        match self.peek()? {
            quote @ ('"' | '\'') => self.string(quote).map(Value::Str),
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            _ => match self.word() {
                "True" => Some(Value::Bool(true)),
                "False" => Some(Value::Bool(false)),
                "None" => Some(Value::Null),
                _ => None,
            },
        }
    }

    fn string(&mut self, quote: char) -> Option<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\\' => out.push(match self.bump()? {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                }),
                c => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
        {
            self.bump();
        }
        let text = self.src[start..self.pos].replace('_', "");
        match text.parse::<i64>() {
            Ok(int) => Some(Value::Int(int)),
            Err(_) => text.parse::<f64>().ok().map(Value::Float),
        }
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::parse_repr;
    use crate::graph::Value;

    #[test]
    fn literal_calls() {
        let call = parse_repr("geo/geo.Point(1, -2.5)").unwrap();
        assert_eq!(call.module, "geo");
        assert_eq!(call.callee, "geo.Point");
        assert_eq!(call.args, vec![Value::Int(1), Value::Float(-2.5)]);

        let call = parse_repr("uuid/UUID('12345678-1234', None, True,)").unwrap();
        assert_eq!(call.callee, "UUID");
        assert_eq!(
            call.args,
            vec![Value::from("12345678-1234"), Value::Null, Value::Bool(true)],
        );

        let call = parse_repr("pkg/Empty()").unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn rejects_non_literals() {
        assert!(parse_repr("no slash").is_none());
        assert!(parse_repr("os/os.system('ls') or 1").is_none());
        assert!(parse_repr("pkg/Thing(other())").is_none());
        assert!(parse_repr("pkg/Thing(x)").is_none());
        assert!(parse_repr("pkg/(1)").is_none());
        assert!(parse_repr("pkg/Thing('open").is_none());
        assert!(parse_repr("pkg/Thing(1 2)").is_none());
    }
}

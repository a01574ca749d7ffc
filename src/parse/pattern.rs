use winnow::combinator::{cut_err, opt, peek, preceded};
use url::Url;
use winnow::error::{ErrMode, ModalResult, ParserError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::types::pattern::{ComponentPattern, Part, UrlPattern};

// -- Origin -----------------------------------------------------------------

fn scheme<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
        }),
    )
        .take()
        .parse_next(input)
}

/// `scheme://host[:port]`, normalized the way link origins are: lowercased,
/// default port dropped. Only `http` and `https` are accepted.
fn origin(input: &mut &str) -> ModalResult<String> {
    let text = (
        scheme,
        "://",
        cut_err(take_while(1.., |c: char| !matches!(c, '/' | '?' | '#')))
            .context(StrContext::Expected(StrContextValue::Description("host"))),
    )
        .take()
        .parse_next(input)?;
    match Url::parse(text) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(url.origin().ascii_serialization())
        }
        _ => Err(ErrMode::from_input(&*input).cut()),
    }
}

// -- Components -------------------------------------------------------------

fn group_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn flush_literal(literal: &mut String, parts: &mut Vec<Part>) {
    if !literal.is_empty() {
        parts.push(Part::Literal(std::mem::take(literal)));
    }
}

/// Parse one component up to (not including) any of `stops`.
fn component(stops: &'static [char]) -> impl FnMut(&mut &str) -> ModalResult<ComponentPattern> {
    move |input: &mut &str| -> ModalResult<ComponentPattern> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        while let Some(next) = input.chars().next() {
            if stops.contains(&next) {
                break;
            }
            let ch = any.parse_next(input)?;
            match ch {
                '\\' => {
                    let escaped = cut_err(any)
                        .context(StrContext::Expected(StrContextValue::Description(
                            "escaped character",
                        )))
                        .parse_next(input)?;
                    literal.push(escaped);
                }
                '*' => {
                    flush_literal(&mut literal, &mut parts);
                    // `**` is the same as `*`
                    if parts.last() != Some(&Part::Wildcard) {
                        parts.push(Part::Wildcard);
                    }
                }
                ':' => {
                    flush_literal(&mut literal, &mut parts);
                    cut_err(group_name)
                        .context(StrContext::Expected(StrContextValue::Description(
                            "group name",
                        )))
                        .parse_next(input)?;
                    parts.push(Part::Segment);
                }
                c => literal.push(c),
            }
        }
        flush_literal(&mut literal, &mut parts);
        Ok(ComponentPattern::new(parts))
    }
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn url_pattern(input: &mut &str) -> ModalResult<UrlPattern> {
    let origin = opt(origin).parse_next(input)?;

    let pathname = if origin.is_some() && !input.starts_with('/') {
        ComponentPattern::any()
    } else {
        if origin.is_none() {
            cut_err(peek('/'))
                .context(StrContext::Expected(StrContextValue::CharLiteral('/')))
                .parse_next(input)?;
        }
        component(&['?', '#']).parse_next(input)?
    };

    let search = opt(preceded('?', component(&['#']))).parse_next(input)?;
    let hash = opt(preceded('#', component(&[]))).parse_next(input)?;

    Ok(UrlPattern {
        source: String::new(),
        origin,
        pathname,
        search,
        hash,
    })
}

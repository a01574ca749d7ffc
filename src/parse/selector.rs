use winnow::combinator::{alt, cut_err, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, ParserError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::types::selector::{AttrOp, AttrSelector, Combinator, ComplexSelector, Compound};

// -- Whitespace & identifiers -----------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
    })
    .parse_next(input)
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any)
            .context(StrContext::Expected(StrContextValue::Description(
                "closing quote",
            )))
            .parse_next(input)?;
        match ch {
            c if c == quote => return Ok(s),
            '\\' => {
                let escaped = cut_err(any).parse_next(input)?;
                s.push(escaped);
            }
            c => s.push(c),
        }
    }
}

// -- Attribute selectors ----------------------------------------------------

fn attr_op(input: &mut &str) -> ModalResult<AttrOp> {
    alt((
        "=".value(AttrOp::Equals),
        "~=".value(AttrOp::Includes),
        "^=".value(AttrOp::Prefix),
        "$=".value(AttrOp::Suffix),
        "*=".value(AttrOp::Substring),
    ))
    .parse_next(input)
}

fn attr_value(input: &mut &str) -> ModalResult<String> {
    ws.parse_next(input)?;
    cut_err(alt((quoted, ident.map(str::to_owned))))
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute value",
        )))
        .parse_next(input)
}

fn attribute(input: &mut &str) -> ModalResult<AttrSelector> {
    '['.parse_next(input)?;
    ws.parse_next(input)?;
    let name = cut_err(ident)
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute name",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let test = opt((attr_op, attr_value)).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(']')
        .context(StrContext::Expected(StrContextValue::CharLiteral(']')))
        .parse_next(input)?;
    Ok(AttrSelector {
        name: name.to_ascii_lowercase(),
        test,
    })
}

// -- Compound selectors -----------------------------------------------------

enum Simple {
    Id(String),
    Class(String),
    Attr(AttrSelector),
}

fn simple(input: &mut &str) -> ModalResult<Simple> {
    alt((
        preceded('#', cut_err(ident)).map(|id: &str| Simple::Id(id.to_owned())),
        preceded('.', cut_err(ident)).map(|class: &str| Simple::Class(class.to_owned())),
        attribute.map(Simple::Attr),
    ))
    .parse_next(input)
}

fn compound(input: &mut &str) -> ModalResult<Compound> {
    let universal = opt('*').parse_next(input)?.is_some();
    let tag = if universal {
        None
    } else {
        opt(ident).parse_next(input)?.map(str::to_ascii_lowercase)
    };

    let simples: Vec<Simple> = repeat(0.., simple).parse_next(input)?;
    let mut compound = Compound {
        tag,
        ..Compound::default()
    };
    for s in simples {
        match s {
            Simple::Id(id) => compound.ids.push(id),
            Simple::Class(class) => compound.classes.push(class),
            Simple::Attr(attr) => compound.attributes.push(attr),
        }
    }

    if !universal && compound.is_empty() {
        return Err(ErrMode::from_input(&*input));
    }
    Ok(compound)
}

// -- Complex selectors ------------------------------------------------------

fn combinator(input: &mut &str) -> ModalResult<Combinator> {
    let spaced: &str = take_while(0.., |c: char| c.is_ascii_whitespace()).parse_next(input)?;
    if opt('>').parse_next(input)?.is_some() {
        ws.parse_next(input)?;
        return Ok(Combinator::Child);
    }
    if !spaced.is_empty() && !input.is_empty() && !input.starts_with(',') {
        return Ok(Combinator::Descendant);
    }
    Err(ErrMode::from_input(&*input))
}

fn complex(input: &mut &str) -> ModalResult<ComplexSelector> {
    let first = compound
        .context(StrContext::Expected(StrContextValue::Description(
            "selector",
        )))
        .parse_next(input)?;
    let rest: Vec<(Combinator, Compound)> =
        repeat(0.., (combinator, cut_err(compound))).parse_next(input)?;

    // Stored subject-first: the last compound is the link element itself.
    let mut subject = first;
    let mut chain = Vec::with_capacity(rest.len());
    for (comb, next) in rest {
        chain.push((comb, std::mem::replace(&mut subject, next)));
    }
    chain.reverse();

    Ok(ComplexSelector { subject, chain })
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn selector_list(input: &mut &str) -> ModalResult<Vec<ComplexSelector>> {
    ws.parse_next(input)?;
    let selectors: Vec<ComplexSelector> =
        separated(1.., complex, (ws, ',', ws)).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(selectors)
}

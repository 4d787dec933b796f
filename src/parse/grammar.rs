use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat, separated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::{ActionMatcher, UrlSpec};

use super::parser::{ParsedRule, ParsedRules};

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

// -- Action names -----------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn matcher(input: &mut &str) -> ModalResult<ActionMatcher> {
    ws.parse_next(input)?;
    if opt('*').parse_next(input)?.is_some() {
        return Ok(ActionMatcher::Any);
    }
    let mut names: Vec<String> = separated(1.., string_literal, (ws, '|', ws))
        .context(StrContext::Expected(StrContextValue::Description(
            "action matcher",
        )))
        .parse_next(input)?;
    if names.len() == 1 {
        Ok(ActionMatcher::Exact(names.remove(0)))
    } else {
        Ok(ActionMatcher::OneOf(names))
    }
}

// -- URL literals -----------------------------------------------------------

fn url_char(c: char) -> bool {
    !c.is_ascii_whitespace() && c != '?' && c != '#' && c != '&' && c != '='
}

fn query_pair(input: &mut &str) -> ModalResult<(String, String)> {
    let key = take_while(1.., url_char).parse_next(input)?;
    '='.parse_next(input)?;
    let value = take_while(0.., url_char).parse_next(input)?;
    Ok((key.to_owned(), value.to_owned()))
}

fn url_literal(input: &mut &str) -> ModalResult<UrlSpec> {
    let path = take_while(1.., |c: char| {
        !c.is_ascii_whitespace() && c != '?' && c != '#'
    })
    .context(StrContext::Expected(StrContextValue::Description("URL")))
    .parse_next(input)?;
    let mut spec = UrlSpec::new(path);
    if opt('?').parse_next(input)?.is_some() {
        let pairs: Vec<(String, String)> =
            separated(1.., query_pair, '&').parse_next(input)?;
        for (key, value) in pairs {
            spec = spec.param(key, value);
        }
    }
    Ok(spec)
}

// -- Rule & default definitions ---------------------------------------------

fn permission_clause(input: &mut &str) -> ModalResult<String> {
    let name = preceded((ws, "requires", ws), cut_err(ident))
        .context(StrContext::Expected(StrContextValue::Description(
            "permission name",
        )))
        .parse_next(input)?;
    Ok(name.to_owned())
}

fn rule_def(input: &mut &str) -> ModalResult<ParsedRule> {
    ws.parse_next(input)?;
    "rule".parse_next(input)?;
    ws.parse_next(input)?;

    let matcher = cut_err(matcher).parse_next(input)?;
    let permission = opt(permission_clause).parse_next(input)?;

    ws.parse_next(input)?;
    cut_err("->").parse_next(input)?;
    ws.parse_next(input)?;

    let url = cut_err(url_literal).parse_next(input)?;

    Ok(ParsedRule {
        matcher,
        url,
        permission,
    })
}

fn default_def(input: &mut &str) -> ModalResult<UrlSpec> {
    ws.parse_next(input)?;
    "default".parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(url_literal)
        .context(StrContext::Expected(StrContextValue::Description(
            "default URL",
        )))
        .parse_next(input)
}

// -- Top-level parser -------------------------------------------------------

enum Def {
    Rule(ParsedRule),
    Default(UrlSpec),
}

pub fn parse_rules(input: &mut &str) -> ModalResult<ParsedRules> {
    let defs: Vec<Def> = repeat(
        0..,
        alt((rule_def.map(Def::Rule), default_def.map(Def::Default))),
    )
    .parse_next(input)?;

    ws.parse_next(input)?;

    let mut rules = Vec::new();
    let mut default_url = None;
    for def in defs {
        match def {
            Def::Rule(rule) => rules.push(rule),
            Def::Default(url) => default_url = Some(url),
        }
    }

    Ok(ParsedRules { rules, default_url })
}

//! A small textual syntax for rules, used for diagnostics and tests.
//!
//! ```text
//! q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y), ~r(?X) .
//! ```
//!
//! `?X` is a universal variable, `!Y` an existential one, `_:n` a
//! named null, `<iri>` or a bare identifier an abstract constant, and
//! `"lex"`, `"lex"^^<iri>` or `"lex"@lang` a literal value.  `~` negates
//! a body literal.  Every parsed rule goes through `Rule::new`.
use crate::model::{Literal, Predicate, Rule, Term, XSD_STRING};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char as nomchar, multispace0, none_of},
    combinator::{all_consuming, map as nommap, map_res, opt, value},
    error::ParseError,
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

pub type IResult<I, O, E = nom::error::VerboseError<I>> = Result<(I, O), nom::Err<E>>;

type In<'a> = &'a str;

pub fn wsl<'a, F, O, E>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O, E>
where
    E: ParseError<In<'a>>,
    F: FnMut(In<'a>) -> IResult<In<'a>, O, E> + 'a,
{
    preceded(multispace0, inner)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

pub fn name(s: In) -> IResult<In, In> {
    take_while1(is_name_char)(s)
}

pub fn iri(s: In) -> IResult<In, In> {
    let body = take_while1(|c: char| c != '>' && !c.is_whitespace());
    delimited(nomchar('<'), body, nomchar('>'))(s)
}

pub fn quoted(s: In) -> IResult<In, String> {
    let escaped = preceded(
        nomchar('\\'),
        alt((value('\\', nomchar('\\')), value('"', nomchar('"')))),
    );
    let chars = nommap(many0(alt((escaped, none_of("\\\"")))), |chars: Vec<char>| {
        chars.into_iter().collect::<String>()
    });
    delimited(nomchar('"'), chars, nomchar('"'))(s)
}

pub fn lexical_constant(s: In) -> IResult<In, Term> {
    let datatype = nommap(preceded(tag("^^"), iri), |iri: In| Suffix::Datatype(iri.into()));
    let language = nommap(preceded(nomchar('@'), name), |lang: In| Suffix::Language(lang.into()));

    enum Suffix {
        Datatype(String),
        Language(String),
    }

    nommap(pair(quoted, opt(alt((datatype, language)))), |(lexical, suffix)| match suffix {
        None => Term::DatatypeConstant {
            lexical,
            datatype: XSD_STRING.into(),
        },
        Some(Suffix::Datatype(datatype)) => Term::DatatypeConstant { lexical, datatype },
        Some(Suffix::Language(language)) => Term::LanguageTaggedConstant { lexical, language },
    })(s)
}

pub fn term(s: In) -> IResult<In, Term> {
    let universal = nommap(preceded(nomchar('?'), name), Term::universal);
    let existential = nommap(preceded(nomchar('!'), name), Term::existential);
    let null = nommap(preceded(tag("_:"), name), Term::null);
    let iri_constant = nommap(iri, Term::constant);
    let bare_constant = nommap(name, Term::constant);
    wsl(alt((universal, existential, null, lexical_constant, iri_constant, bare_constant)))(s)
}

pub fn literal(s: In) -> IResult<In, Literal> {
    let negated = nommap(opt(wsl(nomchar('~'))), |tilde| tilde.is_some());
    let arguments = delimited(
        wsl(nomchar('(')),
        separated_list0(wsl(nomchar(',')), term),
        wsl(nomchar(')')),
    );

    map_res(
        tuple((negated, wsl(name), arguments)),
        |(negated, predicate, terms)| {
            let predicate = Predicate::new(predicate, terms.len());
            if negated {
                Literal::negative(predicate, terms)
            } else {
                Literal::new(predicate, terms)
            }
        },
    )(s)
}

pub fn sep(s: In) -> IResult<In, char> {
    wsl(nomchar(','))(s)
}

pub fn turnstile(s: In) -> IResult<In, In> {
    wsl(tag(":-"))(s)
}

pub fn rulesep(s: In) -> IResult<In, char> {
    wsl(nomchar('.'))(s)
}

pub fn rule(s: In) -> IResult<In, Rule> {
    let head = separated_list1(sep, literal);
    let body = preceded(turnstile, separated_list0(sep, literal));
    map_res(terminated(pair(head, body), rulesep), |(head, body)| Rule::new(head, body))(s)
}

pub fn program(s: In) -> IResult<In, Vec<Rule>> {
    terminated(many0(rule), multispace0)(s)
}

/// Parses a single literal, e.g., `~p(?X, a)`.
///
/// # Errors
///
/// Returns `Err` on syntax errors.
pub fn parse_literal(text: &str) -> Result<Literal, &'static str> {
    all_consuming(terminated(literal, multispace0))(text)
        .map(|(_, ret)| ret)
        .map_err(|_| "Failed to parse literal.")
}

/// Parses and validates a single rule.
///
/// # Errors
///
/// Returns `Err` on syntax errors, and on rules rejected by
/// `Rule::new`.
pub fn parse_rule(text: &str) -> Result<Rule, &'static str> {
    all_consuming(terminated(rule, multispace0))(text)
        .map(|(_, ret)| ret)
        .map_err(|_| "Failed to parse rule.")
}

/// Parses a sequence of rules.
///
/// # Errors
///
/// Returns `Err` when any rule fails to parse or validate.
pub fn parse_program(text: &str) -> Result<Vec<Rule>, &'static str> {
    all_consuming(program)(text)
        .map(|(_, ret)| ret)
        .map_err(|_| "Failed to parse program.")
}

#[test]
fn test_terms() {
    let parse = |text| term(text).expect("ok").1;

    assert_eq!(parse("?X"), Term::universal("X"));
    assert_eq!(parse("!Y_1"), Term::existential("Y_1"));
    assert_eq!(parse("_:b0"), Term::null("b0"));
    assert_eq!(parse("abc"), Term::constant("abc"));
    assert_eq!(parse("42"), Term::constant("42"));
    assert_eq!(
        parse("<http://example.org/a>"),
        Term::constant("http://example.org/a")
    );
    assert_eq!(
        parse("\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>"),
        Term::DatatypeConstant {
            lexical: "1".into(),
            datatype: "http://www.w3.org/2001/XMLSchema#integer".into()
        }
    );
    assert_eq!(
        parse("\"chat\"@fr"),
        Term::LanguageTaggedConstant {
            lexical: "chat".into(),
            language: "fr".into()
        }
    );
    assert_eq!(
        parse("\"\""),
        Term::DatatypeConstant {
            lexical: "".into(),
            datatype: XSD_STRING.into()
        }
    );
    assert_eq!(parse("\"a\\\"b\"").name(), "a\"b");
}

#[test]
fn test_literals() {
    let lit = parse_literal(" ~ edge ( ?X , b ) ").expect("ok");

    assert!(lit.is_negated());
    assert_eq!(lit.predicate(), &Predicate::new("edge", 2));
    assert_eq!(lit.to_string(), "~edge(?X, b)");
    assert_eq!(parse_literal("p()").expect("ok").predicate().arity, 0);
    assert!(parse_literal("p(?X").is_err());
    assert!(parse_literal("p(?X#0)").is_err());
}

#[test]
fn test_rules() {
    let rule = parse_rule("q(?X, !Z), q(?Y, !Z) :- p(?X, ?Y) .").expect("ok");

    assert_eq!(rule.head().len(), 2);
    assert_eq!(rule.body().len(), 1);
    assert_eq!(rule.existential_variables(), vec![Term::existential("Z")]);

    assert!(parse_rule("b(!Y) :- .").is_ok());
    assert!(parse_rule("q(?X) :- p(?Y) .").is_err());
    assert!(parse_rule("q(?X) :- p(?X)").is_err());
    assert!(parse_rule("~q(?X) :- p(?X) .").is_err());
}

#[test]
fn test_program() {
    let rules = parse_program(
        "
        q(?X) :- p(?X) .
        r(?X, !Y) :- q(?X), ~s(?X) .
        ",
    )
    .expect("ok");

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[1].to_string(), "r(?X, !Y) :- q(?X), ~s(?X) .");
    assert_eq!(parse_program("  ").expect("ok"), vec![]);
    assert!(parse_program("q(?X) :- p(?X) . garbage").is_err());
    assert!(parse_program("q(?X) :- p(?Y) .").is_err());
}

#[test]
fn test_display_round_trip() {
    let text = "r(<http://example.org/a>, \"x\"@en, \"1\"^^<http://www.w3.org/2001/XMLSchema#integer>, _:n, ?X) :- p(?X) .";
    let rule = parse_rule(text).expect("ok");

    assert_eq!(rule.to_string(), text);
}

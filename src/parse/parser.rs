use super::{ast::*, error::ParseError, lexer::tokenize};
use crate::common::*;

type PResult<T> = Result<T, ParseError>;

/// A term shape and the function that recognizes it.
///
/// A matcher returns `None` when the body does not have its shape, so the
/// next rule gets a turn, and `Some(Err(_))` when the shape matches but one
/// of its values is out of range.
pub struct TermRule {
    pub name: &'static str,
    matcher: fn(&str, Sign, &str) -> Option<PResult<Term>>,
}

/// Term shapes in priority order. The first rule that matches decides.
pub const TERM_RULES: &[TermRule] = &[
    TermRule {
        name: "percentile",
        matcher: match_percentile,
    },
    TermRule {
        name: "dice-drop-lowest",
        matcher: match_dice_drop_lowest,
    },
    TermRule {
        name: "dice",
        matcher: match_dice,
    },
    TermRule {
        name: "single-die",
        matcher: match_single_die,
    },
    TermRule {
        name: "flat",
        matcher: match_flat,
    },
];

/// Parses one term body, optionally prefixed by a single `+` or `-`.
pub fn parse_term(s: &str) -> PResult<Term> {
    let term: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let (sign, body) = match term.chars().next().and_then(Sign::from_char) {
        Some(sign) => (sign, &term[1..]),
        None => (Sign::Pos, &term[..]),
    };
    if body.is_empty() {
        return Err(ParseError::EmptyTerm);
    }

    TERM_RULES
        .iter()
        .find_map(|rule| (rule.matcher)(body, sign, &term))
        .unwrap_or_else(|| Err(ParseError::UnrecognizedTerm(term.clone())))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn number(s: &str, term: &str) -> PResult<UInt> {
    s.parse()
        .map_err(|_| ParseError::NumberTooLarge(term.to_string()))
}

fn dice(sign: Sign, num: &str, sides: &str, term: &str) -> PResult<DiceTerm> {
    let num = number(num, term)?;
    let sides = number(sides, term)?;
    if num < 1 {
        return Err(ParseError::InvalidDiceCount {
            term: term.to_string(),
        });
    }
    if sides < 2 {
        return Err(ParseError::InvalidSideCount {
            term: term.to_string(),
        });
    }
    Ok(DiceTerm::new(sign, num, sides))
}

fn match_percentile(body: &str, sign: Sign, _: &str) -> Option<PResult<Term>> {
    (body == "d%").then(|| Ok(Term::Dice(DiceTerm::new(sign, 1, 100))))
}

fn match_dice_drop_lowest(body: &str, sign: Sign, term: &str) -> Option<PResult<Term>> {
    let (num, rest) = body.split_once('d')?;
    let (sides, drop) = rest.split_once("dl")?;
    if !(is_digits(num) && is_digits(sides) && is_digits(drop)) {
        return None;
    }

    Some(dice(sign, num, sides, term).and_then(|dice| {
        let drop = number(drop, term)?;
        if drop >= dice.num {
            Err(ParseError::InvalidDropCount {
                term: term.to_string(),
                drop,
                num: dice.num,
            })
        } else {
            Ok(Term::Dice(dice.with_inline_drop(drop)))
        }
    }))
}

fn match_dice(body: &str, sign: Sign, term: &str) -> Option<PResult<Term>> {
    let (num, sides) = body.split_once('d')?;
    if !(is_digits(num) && is_digits(sides)) {
        return None;
    }
    Some(dice(sign, num, sides, term).map(Term::Dice))
}

fn match_single_die(body: &str, sign: Sign, term: &str) -> Option<PResult<Term>> {
    let sides = body.strip_prefix('d')?;
    if !is_digits(sides) {
        return None;
    }
    Some(dice(sign, "1", sides, term).map(Term::Dice))
}

fn match_flat(body: &str, sign: Sign, term: &str) -> Option<PResult<Term>> {
    if !is_digits(body) {
        return None;
    }
    Some(number(body, term).map(|value| Term::Flat(FlatTerm::new(sign, value))))
}

pub struct Parser {
    tokens: Vec<Token>,
}

impl Parser {
    pub fn new(s: &str) -> Self {
        Self {
            tokens: tokenize(s),
        }
    }

    pub fn parse(self) -> PResult<Expression> {
        self.validate()?;

        let mut terms = Vec::new();
        let mut pending = Sign::Pos;
        for token in self.tokens {
            match token.kind {
                Lexeme::Sign(sign) => pending = sign,
                Lexeme::Body(body) => {
                    terms.push(parse_term(&format!("{}{}", pending, body))?);
                    pending = Sign::Pos;
                }
            }
        }

        NonEmpty::try_from_vec(terms)
            .map(Expression::new)
            .map_err(|_| ParseError::EmptyExpression)
    }

    fn validate(&self) -> PResult<()> {
        match self.tokens.last() {
            None => return Err(ParseError::EmptyExpression),
            Some(last) if last.is_sign() => return Err(ParseError::TrailingSign),
            Some(_) => {}
        }

        match self
            .tokens
            .windows(2)
            .position(|pair| pair[0].is_sign() && pair[1].is_sign())
        {
            // 1-based position of the second sign
            Some(i) => Err(ParseError::ConsecutiveSigns { position: i + 2 }),
            None => Ok(()),
        }
    }
}

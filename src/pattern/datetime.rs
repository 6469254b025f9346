//! Date and time patterns such as `yyyy-mm-dd` or `h:mm AM/PM`.

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::literal::{currency_symbol_from_bracket, pieces, Piece};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How the half-day marker is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    /// `AM/PM`
    Upper,
    /// `am/pm`
    Lower,
    /// `A/P`
    ShortUpper,
    /// `a/p`
    ShortLower,
}

/// One element of a date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateToken {
    Year { four_digit: bool },
    /// Width 1-2 is numeric, 3 the short name, 4 the full name.
    Month { width: u8 },
    /// Width 1-2 is the day of month, 3 the short weekday, 4 the full weekday.
    Day { width: u8 },
    Hour { pad: bool, twelve_hour: bool },
    Minute { pad: bool },
    Second { pad: bool },
    Meridiem(Meridiem),
    Literal(String),
}

// Tokens before month/minute and 12/24h are settled.
#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Token(DateToken),
    LowerM(usize),
    LowerH(bool),
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTimePattern {
    tokens: Vec<DateToken>,
}

impl DateTimePattern {
    pub fn parse(body: &str) -> Self {
        let lexemes = lex(body);
        Self {
            tokens: resolve(lexemes),
        }
    }

    pub fn tokens(&self) -> &[DateToken] {
        &self.tokens
    }

    pub fn render(&self, dt: &NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            render_token(token, dt, &mut out);
        }
        out
    }
}

/// Returns true for letters that may start a date token.
pub(crate) fn is_date_letter(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's')
}

/// Length of an `AM/PM` or `A/P` marker starting at `chars[i]`, if any.
pub(crate) fn meridiem_len(chars: &[char], i: usize) -> Option<(usize, Meridiem)> {
    let upper = chars.get(i)?.is_ascii_uppercase();
    let rest: String = chars[i..].iter().take(5).collect();
    let lower = rest.to_ascii_lowercase();
    if lower.starts_with("am/pm") {
        let style = if upper {
            Meridiem::Upper
        } else {
            Meridiem::Lower
        };
        Some((5, style))
    } else if lower.starts_with("a/p") {
        let style = if upper {
            Meridiem::ShortUpper
        } else {
            Meridiem::ShortLower
        };
        Some((3, style))
    } else {
        None
    }
}

fn lex(body: &str) -> Vec<Lexeme> {
    let mut out = Vec::new();
    let mut raw: Vec<char> = Vec::new();

    // Raw runs are lexed together so letter repeats can be counted.
    let flush = |raw: &mut Vec<char>, out: &mut Vec<Lexeme>| {
        lex_raw(raw, out);
        raw.clear();
    };

    for piece in pieces(body) {
        match piece {
            Piece::Raw(_, c) => raw.push(c),
            Piece::Quoted(text) => {
                flush(&mut raw, &mut out);
                out.push(Lexeme::Token(DateToken::Literal(text.to_string())));
            }
            Piece::Escaped(c) => {
                flush(&mut raw, &mut out);
                out.push(Lexeme::Token(DateToken::Literal(c.to_string())));
            }
            Piece::Bracket(content) => {
                flush(&mut raw, &mut out);
                if let Some(symbol) = currency_symbol_from_bracket(content) {
                    out.push(Lexeme::Token(DateToken::Literal(symbol.to_string())));
                }
            }
        }
    }
    flush(&mut raw, &mut out);
    out
}

fn lex_raw(chars: &[char], out: &mut Vec<Lexeme>) {
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if matches!(c, 'A' | 'a') {
            if let Some((len, style)) = meridiem_len(chars, i) {
                out.push(Lexeme::Token(DateToken::Meridiem(style)));
                i += len;
                continue;
            }
        }

        if !is_date_letter(c) {
            push_literal(out, c);
            i += 1;
            continue;
        }

        // y, d and s runs are case-insensitive; h/H and m/M are not.
        let same = |other: char| match c {
            'y' | 'Y' | 'd' | 'D' | 's' | 'S' => other.eq_ignore_ascii_case(&c),
            _ => other == c,
        };
        let run = chars[i..].iter().take_while(|ch| same(**ch)).count();
        let width = run.min(4) as u8;

        let lexeme = match c {
            'y' | 'Y' => Lexeme::Token(DateToken::Year {
                four_digit: run >= 3,
            }),
            'd' | 'D' => Lexeme::Token(DateToken::Day { width }),
            's' | 'S' => Lexeme::Token(DateToken::Second { pad: run >= 2 }),
            'H' => Lexeme::Token(DateToken::Hour {
                pad: run >= 2,
                twelve_hour: false,
            }),
            'h' => Lexeme::LowerH(run >= 2),
            'M' => Lexeme::Token(DateToken::Month { width }),
            _ if run >= 3 => Lexeme::Token(DateToken::Month { width }),
            _ => Lexeme::LowerM(run),
        };
        out.push(lexeme);
        i += run;
    }
}

fn push_literal(out: &mut Vec<Lexeme>, c: char) {
    if let Some(Lexeme::Token(DateToken::Literal(text))) = out.last_mut() {
        text.push(c);
    } else {
        out.push(Lexeme::Token(DateToken::Literal(c.to_string())));
    }
}

fn is_hour(lexeme: &Lexeme) -> bool {
    matches!(
        lexeme,
        Lexeme::LowerH(_) | Lexeme::Token(DateToken::Hour { .. })
    )
}

fn is_literal(lexeme: &Lexeme) -> bool {
    matches!(lexeme, Lexeme::Token(DateToken::Literal(_)))
}

fn resolve(lexemes: Vec<Lexeme>) -> Vec<DateToken> {
    let twelve_hour = lexemes
        .iter()
        .any(|l| matches!(l, Lexeme::Token(DateToken::Meridiem(_))));

    let mut tokens = Vec::with_capacity(lexemes.len());
    for (i, lexeme) in lexemes.iter().enumerate() {
        let token = match lexeme {
            Lexeme::Token(token) => token.clone(),
            Lexeme::LowerH(pad) => DateToken::Hour {
                pad: *pad,
                twelve_hour,
            },
            Lexeme::LowerM(run) => {
                let after_hour = lexemes[..i]
                    .iter()
                    .rev()
                    .find(|l| !is_literal(l))
                    .is_some_and(is_hour);
                let before_second = lexemes[i + 1..]
                    .iter()
                    .find(|l| !is_literal(l))
                    .is_some_and(|l| matches!(l, Lexeme::Token(DateToken::Second { .. })));
                if after_hour || before_second {
                    DateToken::Minute { pad: *run >= 2 }
                } else {
                    DateToken::Month { width: *run as u8 }
                }
            }
        };
        tokens.push(token);
    }
    tokens
}

fn render_token(token: &DateToken, dt: &NaiveDateTime, out: &mut String) {
    match token {
        DateToken::Year { four_digit: true } => out.push_str(&format!("{:04}", dt.year())),
        DateToken::Year { four_digit: false } => {
            out.push_str(&format!("{:02}", dt.year().rem_euclid(100)))
        }
        DateToken::Month { width } => {
            let name = MONTHS[dt.month0() as usize];
            match width {
                1 => out.push_str(&dt.month().to_string()),
                2 => out.push_str(&format!("{:02}", dt.month())),
                3 => out.push_str(&name[..3]),
                _ => out.push_str(name),
            }
        }
        DateToken::Day { width } => {
            let name = WEEKDAYS[dt.weekday().num_days_from_monday() as usize];
            match width {
                1 => out.push_str(&dt.day().to_string()),
                2 => out.push_str(&format!("{:02}", dt.day())),
                3 => out.push_str(&name[..3]),
                _ => out.push_str(name),
            }
        }
        DateToken::Hour { pad, twelve_hour } => {
            let hour = if *twelve_hour {
                match dt.hour() % 12 {
                    0 => 12,
                    h => h,
                }
            } else {
                dt.hour()
            };
            push_number(out, hour, *pad);
        }
        DateToken::Minute { pad } => push_number(out, dt.minute(), *pad),
        DateToken::Second { pad } => push_number(out, dt.second(), *pad),
        DateToken::Meridiem(style) => {
            let am = dt.hour() < 12;
            let text = match (style, am) {
                (Meridiem::Upper, true) => "AM",
                (Meridiem::Upper, false) => "PM",
                (Meridiem::Lower, true) => "am",
                (Meridiem::Lower, false) => "pm",
                (Meridiem::ShortUpper, true) => "A",
                (Meridiem::ShortUpper, false) => "P",
                (Meridiem::ShortLower, true) => "a",
                (Meridiem::ShortLower, false) => "p",
            };
            out.push_str(text);
        }
        DateToken::Literal(text) => out.push_str(text),
    }
}

fn push_number(out: &mut String, n: u32, pad: bool) {
    if pad {
        out.push_str(&format!("{:02}", n));
    } else {
        out.push_str(&n.to_string());
    }
}

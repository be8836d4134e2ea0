//! Single-line command decoding.
//!
//! Payloads are read the way a C `sscanf` with `%d,%d,%d` or `%lf,%lf` would
//! read them: whitespace may precede each number and anything after the last
//! number is ignored. Coordinates may also be written as hex floats.

use regex::Regex;
use std::sync::OnceLock;
use vecsort_core::{Pass, Point};

use crate::error::{ParseError, ParseResult};

/// Color triple of a `P` command, stored in file order (blue, green, red).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTriple {
    pub b: i64,
    pub g: i64,
    pub r: i64,
}

impl ColorTriple {
    /// The pass selected by a pure green, red or blue triple.
    pub fn pass(&self) -> Option<Pass> {
        match (self.r != 0, self.g != 0, self.b != 0) {
            (false, true, false) => Some(Pass::Green),
            (true, false, false) => Some(Pass::Red),
            (false, false, true) => Some(Pass::Blue),
            _ => None,
        }
    }
}

/// One decoded line of the command stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `P` - select the active pass.
    SelectPass(Pass),
    /// `M` - start a new subpath.
    MoveTo(Point),
    /// `L` - cut from the current point.
    LineTo(Point),
    /// `C` - cut back to the subpath origin.
    Close,
    /// `X` - end of job.
    End,
    /// Any other leading character.
    Unknown(char),
}

impl Command {
    /// Decodes one line without its trailing newline.
    ///
    /// An empty line decodes as `Unknown('\n')`, matching a reader that looks
    /// at the first byte of each raw line.
    pub fn parse(line: &str, line_number: usize) -> ParseResult<Self> {
        let mut chars = line.chars();
        let Some(letter) = chars.next() else {
            return Ok(Self::Unknown('\n'));
        };
        let payload = chars.as_str();

        match letter {
            'P' => {
                let color = parse_color(payload).ok_or_else(|| ParseError::InvalidColor {
                    line_number,
                    text: payload.to_string(),
                })?;
                let pass = color.pass().ok_or(ParseError::MixedColor {
                    line_number,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                })?;
                Ok(Self::SelectPass(pass))
            }
            'M' | 'L' => {
                let point =
                    parse_point(payload).ok_or_else(|| ParseError::MalformedCoordinates {
                        line_number,
                        command: letter,
                        text: payload.to_string(),
                    })?;
                Ok(if letter == 'M' {
                    Self::MoveTo(point)
                } else {
                    Self::LineTo(point)
                })
            }
            'C' => Ok(Self::Close),
            'X' => Ok(Self::End),
            other => Ok(Self::Unknown(other)),
        }
    }
}

fn parse_color(payload: &str) -> Option<ColorTriple> {
    static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d+),\s*([+-]?\d+),\s*([+-]?\d+)").expect("invalid regex pattern")
    });

    let caps = regex.captures(payload)?;
    Some(ColorTriple {
        b: caps[1].parse().ok()?,
        g: caps[2].parse().ok()?,
        r: caps[3].parse().ok()?,
    })
}

fn parse_point(payload: &str) -> Option<Point> {
    static POINT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = POINT_REGEX.get_or_init(|| {
        let hex = r"[+-]?0[xX](?:[0-9a-fA-F]+\.?[0-9a-fA-F]*|\.[0-9a-fA-F]+)(?:[pP][+-]?\d+)?";
        let decimal = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";
        let number = format!("({hex}|{decimal})");
        Regex::new(&format!(r"^\s*{number},\s*{number}")).expect("invalid regex pattern")
    });

    let caps = regex.captures(payload)?;
    let x = parse_number(&caps[1])?;
    let y = parse_number(&caps[2])?;
    (x.is_finite() && y.is_finite()).then(|| Point::new(x, y))
}

/// Decimal or C99 hex-float (`0x1.8p3`) literal.
fn parse_number(text: &str) -> Option<f64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => parse_hex_float(hex)?,
        None => unsigned.parse().ok()?,
    };
    Some(if negative { -value } else { value })
}

fn parse_hex_float(text: &str) -> Option<f64> {
    let (mantissa, exponent) = match text.find(['p', 'P']) {
        Some(at) => (&text[..at], text[at + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut value = 0.0_f64;
    for digit in whole.chars().chain(fraction.chars()) {
        value = value * 16.0 + f64::from(digit.to_digit(16)?);
    }
    let scale = exponent.checked_sub(4 * i32::try_from(fraction.len()).ok()?)?;
    Some(value * 2f64.powi(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels_are_bgr() {
        assert_eq!(
            Command::parse("P0,255,0", 1).unwrap(),
            Command::SelectPass(Pass::Green)
        );
        assert_eq!(
            Command::parse("P0,0,255", 1).unwrap(),
            Command::SelectPass(Pass::Red)
        );
        assert_eq!(
            Command::parse("P255,0,0", 1).unwrap(),
            Command::SelectPass(Pass::Blue)
        );
    }

    #[test]
    fn test_mixed_color_is_rejected() {
        let err = Command::parse("P10,10,10", 3).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MixedColor {
                line_number: 3,
                r: 10,
                g: 10,
                b: 10
            }
        ));

        let err = Command::parse("P0,0,0", 1).unwrap_err();
        assert!(err.is_malformed_color());
    }

    #[test]
    fn test_truncated_color_is_rejected() {
        let err = Command::parse("P0,255", 2).unwrap_err();
        assert!(matches!(err, ParseError::InvalidColor { line_number: 2, .. }));
    }

    #[test]
    fn test_negative_channel_counts_as_set() {
        assert_eq!(
            Command::parse("P0,-1,0", 1).unwrap(),
            Command::SelectPass(Pass::Green)
        );
    }

    #[test]
    fn test_points_accept_sscanf_forms() {
        assert_eq!(
            Command::parse("M1.5,-2", 1).unwrap(),
            Command::MoveTo(Point::new(1.5, -2.0))
        );
        assert_eq!(
            Command::parse("L .5, 3e2 trailing", 1).unwrap(),
            Command::LineTo(Point::new(0.5, 300.0))
        );
        assert_eq!(
            Command::parse("L10,10\r", 1).unwrap(),
            Command::LineTo(Point::new(10.0, 10.0))
        );
    }

    #[test]
    fn test_points_accept_hex_floats() {
        assert_eq!(
            Command::parse("L0x1p3,0x.8", 1).unwrap(),
            Command::LineTo(Point::new(8.0, 0.5))
        );
        assert_eq!(
            Command::parse("M -0X1.8P1, +0x10", 1).unwrap(),
            Command::MoveTo(Point::new(-3.0, 16.0))
        );
    }

    #[test]
    fn test_bad_points_are_rejected() {
        for line in ["L", "Lx,1", "M1;2", "L1e999,0", "L0x1p9999,0"] {
            let err = Command::parse(line, 7).unwrap_err();
            assert!(
                matches!(err, ParseError::MalformedCoordinates { line_number: 7, .. }),
                "{line} should be rejected"
            );
        }
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(Command::parse("C", 1).unwrap(), Command::Close);
        assert_eq!(Command::parse("X", 1).unwrap(), Command::End);
        assert_eq!(Command::parse("Q1,2", 1).unwrap(), Command::Unknown('Q'));
        assert_eq!(Command::parse("", 1).unwrap(), Command::Unknown('\n'));
    }
}

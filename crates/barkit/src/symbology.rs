//! Supported barcode symbologies.
//!
//! [`Symbology`] is the closed registry of identifiers accepted by
//! [`generate`](crate::generate). Every identifier maps onto one of the bar
//! pattern encoders of the [`barcoders`] crate; this module only normalizes
//! the payload (check digits, GS1 prefixes, case) before handing it over.
//!
//! # Example
//!
//! ```
//! use barkit::Symbology;
//!
//! let symbology: Symbology = "ean13".parse().unwrap();
//! let barcode = symbology.encode("590123412345").unwrap();
//! assert_eq!(barcode.text(), "5901234123457");
//! assert_eq!(barcode.modules().len(), 95);
//! ```

use std::{fmt, str::FromStr};

use barcoders::sym::{code39::Code39, code93::Code93, code128::Code128, ean8::EAN8, ean13::EAN13};
use log::trace;

use crate::error::EncodeError;

/// Code 128 character set B selector understood by the backend encoder.
const CODE128_SET_B: char = 'Ɓ';

/// A barcode encoding scheme known to barkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Code128,
    Code39,
    Code93,
    Ean,
    Ean13,
    Ean8,
    Gs1,
    Gtin,
    Isbn,
    Isbn10,
    Isbn13,
    Issn,
    Jan,
    Pzn,
    Upc,
    Upca,
}

impl Symbology {
    /// Every supported symbology, sorted by identifier.
    pub const ALL: [Symbology; 16] = [
        Self::Code128,
        Self::Code39,
        Self::Code93,
        Self::Ean,
        Self::Ean13,
        Self::Ean8,
        Self::Gs1,
        Self::Gtin,
        Self::Isbn,
        Self::Isbn10,
        Self::Isbn13,
        Self::Issn,
        Self::Jan,
        Self::Pzn,
        Self::Upc,
        Self::Upca,
    ];

    /// Returns the lowercase identifier of this symbology.
    pub fn name(self) -> &'static str {
        match self {
            Self::Code128 => "code128",
            Self::Code39 => "code39",
            Self::Code93 => "code93",
            Self::Ean => "ean",
            Self::Ean13 => "ean13",
            Self::Ean8 => "ean8",
            Self::Gs1 => "gs1",
            Self::Gtin => "gtin",
            Self::Isbn => "isbn",
            Self::Isbn10 => "isbn10",
            Self::Isbn13 => "isbn13",
            Self::Issn => "issn",
            Self::Jan => "jan",
            Self::Pzn => "pzn",
            Self::Upc => "upc",
            Self::Upca => "upca",
        }
    }

    /// Returns the identifiers of all supported symbologies, in listing order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|symbology| symbology.name())
    }

    /// Encodes `code` into its bar modules.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the payload has the wrong length,
    /// contains characters outside the symbology's alphabet, carries a
    /// wrong check digit or lacks a mandatory prefix.
    pub fn encode(self, code: &str) -> Result<Barcode, EncodeError> {
        let (text, modules) = match self {
            Self::Ean | Self::Ean13 | Self::Gs1 | Self::Gtin | Self::Jan => {
                let data = ean_data(self, code, 12)?;
                ean13(self, data)?
            }
            Self::Ean8 => {
                let data = ean_data(self, code, 7)?;
                let modules = backend(self, EAN8::new(data.clone()).map(|bc| bc.encode()))?;
                (with_check_digit(&data), modules)
            }
            Self::Upc | Self::Upca => {
                let data = ean_data(self, code, 11)?;
                let (text, modules) = ean13(self, format!("0{data}"))?;
                (text[1..].to_string(), modules)
            }
            Self::Isbn | Self::Isbn13 => {
                let data = ean_data(self, code, 12)?;
                if !(data.starts_with("978") || data.starts_with("979")) {
                    return Err(EncodeError::InvalidPrefix {
                        symbology: self,
                        expected: "978 or 979",
                    });
                }
                ean13(self, data)?
            }
            Self::Isbn10 => {
                let data = mod11_data(self, code, 9, isbn10_check_digit)?;
                ean13(self, format!("978{data}"))?
            }
            Self::Issn => {
                let data = mod11_data(self, code, 7, issn_check_digit)?;
                ean13(self, format!("977{data}00"))?
            }
            Self::Pzn => {
                let text = format!("PZN-{}", pzn_data(code)?);
                let modules = backend(self, Code39::new(text.clone()).map(|bc| bc.encode()))?;
                (text, modules)
            }
            Self::Code39 => {
                non_empty(self, code)?;
                let text = code.to_uppercase();
                let modules = backend(self, Code39::new(text.clone()).map(|bc| bc.encode()))?;
                (text, modules)
            }
            Self::Code93 => {
                non_empty(self, code)?;
                let text = code.to_uppercase();
                let modules = backend(self, Code93::new(text.clone()).map(|bc| bc.encode()))?;
                (text, modules)
            }
            Self::Code128 => {
                non_empty(self, code)?;
                let data = format!("{CODE128_SET_B}{code}");
                let modules = backend(self, Code128::new(data).map(|bc| bc.encode()))?;
                (code.to_string(), modules)
            }
        };

        trace!(symbology = self.name(), text, modules = modules.len(); "Encoded barcode");

        Ok(Barcode {
            symbology: self,
            text,
            modules,
        })
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an identifier that is not a known symbology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbology(pub String);

impl fmt::Display for UnknownSymbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown symbology `{}`", self.0)
    }
}

impl std::error::Error for UnknownSymbology {}

impl FromStr for Symbology {
    type Err = UnknownSymbology;

    /// Identifiers are matched exactly; callers normalize case first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|symbology| symbology.name() == s)
            .ok_or_else(|| UnknownSymbology(s.to_string()))
    }
}

/// An encoded barcode ready to be handed to a [`Writer`](crate::writer::Writer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    symbology: Symbology,
    text: String,
    modules: Vec<u8>,
}

impl Barcode {
    /// Returns the symbology this barcode was encoded with.
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Returns the human readable text printed under the bars.
    ///
    /// This is the full code, including any computed check digits.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the bar modules, `1` for a dark module and `0` for a light one.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }
}

fn backend<T>(symbology: Symbology, result: Result<T, barcoders::error::Error>) -> Result<T, EncodeError> {
    result.map_err(|err| EncodeError::Backend {
        symbology,
        message: err.to_string(),
    })
}

fn ean13(symbology: Symbology, data: String) -> Result<(String, Vec<u8>), EncodeError> {
    let modules = backend(symbology, EAN13::new(data.clone()).map(|bc| bc.encode()))?;
    Ok((with_check_digit(&data), modules))
}

/// Free-text symbologies still need one character of data.
fn non_empty(symbology: Symbology, code: &str) -> Result<(), EncodeError> {
    if code.is_empty() {
        return Err(EncodeError::InvalidLength {
            symbology,
            found: 0,
            expected: "at least 1 character",
        });
    }
    Ok(())
}

fn digits(symbology: Symbology, code: &str) -> Result<Vec<u8>, EncodeError> {
    code.chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or(EncodeError::InvalidCharacter { symbology, found: c })
        })
        .collect()
}

/// Validates an EAN style payload of `len` data digits, optionally followed
/// by its check digit, and returns the data digits only.
fn ean_data(symbology: Symbology, code: &str, len: usize) -> Result<String, EncodeError> {
    let values = digits(symbology, code)?;
    match values.len() {
        n if n == len => Ok(code.to_string()),
        n if n == len + 1 => {
            let expected = ean_check_digit(&values[..len]);
            let found = values[len];
            if expected != found {
                return Err(EncodeError::InvalidChecksum {
                    symbology,
                    found: char::from(b'0' + found),
                    expected: char::from(b'0' + expected),
                });
            }
            Ok(code[..len].to_string())
        }
        found => Err(EncodeError::InvalidLength {
            symbology,
            found,
            expected: ean_expected_len(len),
        }),
    }
}

fn ean_expected_len(len: usize) -> &'static str {
    match len {
        7 => "7 or 8 digits",
        11 => "11 or 12 digits",
        _ => "12 or 13 digits",
    }
}

/// Computes the GS1 mod-10 check digit for the given data digits.
pub(crate) fn ean_check_digit(data: &[u8]) -> u8 {
    let sum: u32 = data
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn with_check_digit(data: &str) -> String {
    let values: Vec<u8> = data.bytes().map(|b| b - b'0').collect();
    format!("{data}{}", ean_check_digit(&values))
}

/// Validates a mod-11 payload (ISBN-10, ISSN) of `len` digits, optionally
/// followed by its check character, and returns the data digits only.
fn mod11_data(
    symbology: Symbology,
    code: &str,
    len: usize,
    check: fn(&[u8]) -> char,
) -> Result<String, EncodeError> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != len && chars.len() != len + 1 {
        return Err(EncodeError::InvalidLength {
            symbology,
            found: chars.len(),
            expected: if len == 9 { "9 or 10 characters" } else { "7 or 8 characters" },
        });
    }

    let data: String = chars[..len].iter().collect();
    let values = digits(symbology, &data)?;

    if let Some(&found) = chars.get(len) {
        let found = found.to_ascii_uppercase();
        if !(found.is_ascii_digit() || found == 'X') {
            return Err(EncodeError::InvalidCharacter { symbology, found });
        }
        let expected = check(&values);
        if found != expected {
            return Err(EncodeError::InvalidChecksum {
                symbology,
                found,
                expected,
            });
        }
    }

    Ok(data)
}

fn mod11_char(value: u32) -> char {
    match value {
        10 => 'X',
        v => char::from_digit(v, 10).unwrap_or('0'),
    }
}

fn isbn10_check_digit(data: &[u8]) -> char {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (10 - i as u32))
        .sum();
    mod11_char((11 - sum % 11) % 11)
}

fn issn_check_digit(data: &[u8]) -> char {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (8 - i as u32))
        .sum();
    mod11_char((11 - sum % 11) % 11)
}

/// Returns the seven digit PZN (six data digits plus check digit).
fn pzn_data(code: &str) -> Result<String, EncodeError> {
    let symbology = Symbology::Pzn;
    let values = digits(symbology, code)?;
    if values.len() != 6 && values.len() != 7 {
        return Err(EncodeError::InvalidLength {
            symbology,
            found: values.len(),
            expected: "6 or 7 digits",
        });
    }

    let sum: u32 = values[..6]
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (i as u32 + 2))
        .sum();
    let expected = sum % 11;
    if expected == 10 {
        return Err(EncodeError::InvalidChecksum {
            symbology,
            found: values.get(6).map_or('?', |&d| char::from(b'0' + d)),
            expected: 'X',
        });
    }
    let expected = expected as u8;

    match values.get(6) {
        Some(&found) if found != expected => Err(EncodeError::InvalidChecksum {
            symbology,
            found: char::from(b'0' + found),
            expected: char::from(b'0' + expected),
        }),
        _ => Ok(format!("{}{expected}", &code[..6])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_sorted_and_unique() {
        let names: Vec<_> = Symbology::names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_from_str_round_trips_every_name() {
        for symbology in Symbology::ALL {
            assert_eq!(symbology.name().parse::<Symbology>(), Ok(symbology));
        }
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("CODE39".parse::<Symbology>().is_err());
        assert!("qr".parse::<Symbology>().is_err());
    }

    #[test]
    fn test_ean_check_digit() {
        assert_eq!(ean_check_digit(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5]), 7);
        assert_eq!(ean_check_digit(&[9, 6, 3, 8, 5, 0, 7]), 4);
        assert_eq!(ean_check_digit(&[0, 3, 6, 0, 0, 0, 2, 9, 1, 4, 5]), 2);
    }

    #[test]
    fn test_ean13_accepts_twelve_or_thirteen_digits() {
        let short = Symbology::Ean13.encode("590123412345").unwrap();
        let full = Symbology::Ean13.encode("5901234123457").unwrap();
        assert_eq!(short, full);
        assert_eq!(full.text(), "5901234123457");
        assert_eq!(full.modules().len(), 95);
    }

    #[test]
    fn test_ean13_rejects_bad_check_digit() {
        let err = Symbology::Ean13.encode("5901234123450").unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidChecksum {
                symbology: Symbology::Ean13,
                found: '0',
                expected: '7',
            }
        );
    }

    #[test]
    fn test_ean13_rejects_letters_and_length() {
        assert!(matches!(
            Symbology::Ean.encode("59012341234A"),
            Err(EncodeError::InvalidCharacter { found: 'A', .. })
        ));
        assert!(matches!(
            Symbology::Ean.encode("1234"),
            Err(EncodeError::InvalidLength { found: 4, .. })
        ));
    }

    #[test]
    fn test_ean8() {
        let barcode = Symbology::Ean8.encode("9638507").unwrap();
        assert_eq!(barcode.text(), "96385074");
        assert_eq!(barcode.modules().len(), 67);
    }

    #[test]
    fn test_upca_matches_ean13_with_leading_zero() {
        let upc = Symbology::Upca.encode("03600029145").unwrap();
        let ean = Symbology::Ean13.encode("003600029145").unwrap();
        assert_eq!(upc.text(), "036000291452");
        assert_eq!(upc.modules(), ean.modules());
    }

    #[test]
    fn test_isbn13_requires_bookland_prefix() {
        assert!(Symbology::Isbn13.encode("978316148410").is_ok());
        assert_eq!(
            Symbology::Isbn.encode("590123412345").unwrap_err(),
            EncodeError::InvalidPrefix {
                symbology: Symbology::Isbn,
                expected: "978 or 979",
            }
        );
    }

    #[test]
    fn test_isbn10_converts_to_isbn13() {
        let isbn10 = Symbology::Isbn10.encode("316148410X").unwrap();
        assert_eq!(isbn10.text(), "9783161484100");

        let without_check = Symbology::Isbn10.encode("316148410").unwrap();
        assert_eq!(isbn10, without_check);
    }

    #[test]
    fn test_isbn10_accepts_x_check_digit() {
        assert_eq!(isbn10_check_digit(&[0, 8, 0, 4, 4, 2, 9, 5, 7]), 'X');
        assert!(Symbology::Isbn10.encode("080442957x").is_ok());
        assert!(matches!(
            Symbology::Isbn10.encode("0804429571"),
            Err(EncodeError::InvalidChecksum { found: '1', expected: 'X', .. })
        ));
    }

    #[test]
    fn test_issn() {
        assert_eq!(issn_check_digit(&[0, 3, 1, 7, 8, 4, 7]), '1');
        let barcode = Symbology::Issn.encode("03178471").unwrap();
        assert_eq!(barcode.text(), "9770317847001");
    }

    #[test]
    fn test_pzn_appends_check_digit() {
        let barcode = Symbology::Pzn.encode("123456").unwrap();
        assert_eq!(barcode.text(), "PZN-1234562");
        assert_eq!(
            Symbology::Pzn.encode("1234562").unwrap().modules(),
            barcode.modules()
        );
        assert!(matches!(
            Symbology::Pzn.encode("1234567"),
            Err(EncodeError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_code39_uppercases_payload() {
        let lower = Symbology::Code39.encode("abc-123").unwrap();
        let upper = Symbology::Code39.encode("ABC-123").unwrap();
        assert_eq!(lower.text(), "ABC-123");
        assert_eq!(lower.modules(), upper.modules());
    }

    #[test]
    fn test_free_text_symbologies_reject_empty_payload() {
        for symbology in [Symbology::Code128, Symbology::Code39, Symbology::Code93] {
            assert_eq!(
                symbology.encode(""),
                Err(EncodeError::InvalidLength {
                    symbology,
                    found: 0,
                    expected: "at least 1 character",
                })
            );
        }
    }

    #[test]
    fn test_code39_rejects_unsupported_characters() {
        let err = Symbology::Code39.encode("under_score").unwrap_err();
        assert_eq!(err.symbology(), Symbology::Code39);
        assert!(matches!(err, EncodeError::Backend { .. }));
    }

    #[test]
    fn test_modules_are_binary() {
        for (symbology, code) in [
            (Symbology::Code39, "123456789012"),
            (Symbology::Ean13, "400638133393"),
            (Symbology::Pzn, "123456"),
        ] {
            let barcode = symbology.encode(code).unwrap();
            assert!(!barcode.modules().is_empty());
            assert!(barcode.modules().iter().all(|&m| m <= 1));
        }
    }
}

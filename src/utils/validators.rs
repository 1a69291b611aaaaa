//! Stateless format checks for usernames, Iranian identifiers and network
//! addresses.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateIp;

const IBAN_COUNTRY: &str = "IR";
const IBAN_DIGITS: usize = 24;
const BANK_CARD_DIGITS: usize = 16;
const NATIONAL_CODE_DIGITS: usize = 10;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern is valid"));
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[1-9][0-9]{9}$").expect("phone pattern is valid"));
static MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^09[0-9]{9}$").expect("mobile pattern is valid"));
static TEN_DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("ten digit pattern is valid"));

fn is_persian_alphanumeric(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c) && c.is_alphanumeric()
}

fn digits(value: &str) -> Option<Vec<u32>> {
    value.chars().map(|c| c.to_digit(10)).collect()
}

/// ASCII letters and digits, plus any character of `extra`.
pub fn is_alpha_numeric(value: &str, extra: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || extra.contains(c))
}

/// Like [`is_alpha_numeric`] but also accepts Persian-script letters and
/// digits.
pub fn is_alpha_numeric_with_persian(value: &str, extra: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || is_persian_alphanumeric(c) || extra.contains(c)
        })
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME_REGEX.is_match(value)
}

/// Fixed-line number: area code starting with a single `0`, 11 digits total.
pub fn is_valid_iranian_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// Mobile number: `09` followed by 9 digits.
pub fn is_valid_iranian_mobile(value: &str) -> bool {
    MOBILE_REGEX.is_match(value)
}

pub fn is_valid_iranian_postal_code(value: &str) -> bool {
    TEN_DIGITS_REGEX.is_match(value)
}

pub fn is_valid_iranian_id_number(value: &str) -> bool {
    TEN_DIGITS_REGEX.is_match(value)
}

/// National code ("code melli"): ten digits whose last digit is the
/// weighted mod-11 checksum of the first nine.
pub fn is_valid_iranian_national_code(value: &str) -> bool {
    if value.len() != NATIONAL_CODE_DIGITS {
        return false;
    }
    let Some(digits) = digits(value) else {
        return false;
    };

    let remainder = digits[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum::<u32>()
        % 11;
    let check = if remainder < 2 { remainder } else { 11 - remainder };

    digits[9] == check
}

/// 16-digit card number passing the Luhn checksum.
///
/// Luhn does not catch every adjacent transposition (`09` <-> `90`); such
/// numbers are accepted.
pub fn is_valid_iranian_bank_card(value: &str) -> bool {
    if value.len() != BANK_CARD_DIGITS {
        return false;
    }
    digits(value).is_some_and(|digits| luhn_checksum(&digits) == 0)
}

fn luhn_checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum::<u32>()
        % 10
}

/// Iranian IBAN (sheba), with or without the `IR` prefix.
///
/// Spaces are ignored. Without the prefix the 24 digits are still checked as
/// an `IR` account, so the check digits must have been computed for `IR`.
pub fn is_valid_iranian_iban(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let account = compact.strip_prefix(IBAN_COUNTRY).unwrap_or(&compact);

    if account.len() != IBAN_DIGITS || !account.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    iban_remainder(&format!("{IBAN_COUNTRY}{account}")) == Some(1)
}

/// ISO 13616 check: move the first four characters to the end, expand
/// letters to two-digit numbers and reduce mod 97 piecewise.
fn iban_remainder(iban: &str) -> Option<u32> {
    if iban.len() < 4 || !iban.is_ascii() {
        return None;
    }
    let (head, tail) = iban.split_at(4);

    tail.chars()
        .chain(head.chars())
        .try_fold(0_u32, |remainder, c| {
            let value = c.to_digit(36)?;
            Some(if value < 10 {
                (remainder * 10 + value) % 97
            } else {
                (remainder * 100 + value) % 97
            })
        })
}

pub fn is_valid_ip(value: &str) -> bool {
    value.validate_ip()
}

/// `host:port`, split on the last colon. IPv6 hosts may be bracketed
/// (`[::1]:8080`).
pub fn is_valid_ip_port(value: &str) -> bool {
    let Some((host, port)) = value.rsplit_once(':') else {
        return false;
    };
    let host = host
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host);

    !port.is_empty()
        && port.chars().all(|c| c.is_ascii_digit())
        && port.parse::<u16>().is_ok()
        && is_valid_ip(host)
}

use strum::{AsRefStr, Display, EnumString};

/// CLDR plural categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

/// Selects the plural category of an integer count for a language.
///
/// `language` is a primary language subtag (`"en"`, `"fa"`, `"ru"`). Only
/// integer operands are covered; unknown languages use the English rule.
pub fn plural_category(language: &str, count: i64) -> PluralCategory {
    let n = count.unsigned_abs();
    let n10 = n % 10;
    let n100 = n % 100;

    match language {
        "ja" | "zh" | "ko" | "id" | "ms" | "th" | "vi" | "lo" | "my" | "km" => {
            PluralCategory::Other
        }
        "fa" | "fr" | "pt" | "hi" | "bn" | "gu" | "kn" | "mr" | "am" | "zu" | "hy" => {
            if n <= 1 {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        }
        "ru" | "uk" | "be" | "sr" | "hr" | "bs" => {
            if n10 == 1 && n100 != 11 {
                PluralCategory::One
            } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                PluralCategory::Few
            } else {
                PluralCategory::Many
            }
        }
        "pl" => {
            if n == 1 {
                PluralCategory::One
            } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                PluralCategory::Few
            } else {
                PluralCategory::Many
            }
        }
        "cs" | "sk" => match n {
            1 => PluralCategory::One,
            2..=4 => PluralCategory::Few,
            _ => PluralCategory::Other,
        },
        "ar" => match (n, n100) {
            (0, _) => PluralCategory::Zero,
            (1, _) => PluralCategory::One,
            (2, _) => PluralCategory::Two,
            (_, 3..=10) => PluralCategory::Few,
            (_, 11..=99) => PluralCategory::Many,
            _ => PluralCategory::Other,
        },
        "he" => match n {
            1 => PluralCategory::One,
            2 => PluralCategory::Two,
            _ => PluralCategory::Other,
        },
        _ => {
            if n == 1 {
                PluralCategory::One
            } else {
                PluralCategory::Other
            }
        }
    }
}

//! Fabricators for realistic-looking free text and banking identifiers.
//!
//! Every function draws from the supplied RNG only, so a seeded RNG yields a
//! reproducible sequence.

use rand::Rng;
use uuid::Builder;

const SURNAMES: [&str; 32] = [
    "Abbott", "Barrett", "Carlson", "Dawson", "Ellison", "Fletcher", "Garrison", "Hartley",
    "Ingram", "Jennings", "Keller", "Lawson", "Mercer", "Nolan", "Osborne", "Preston",
    "Quinn", "Ramsey", "Sawyer", "Thornton", "Underwood", "Vaughn", "Whitaker", "Xavier",
    "Young", "Zimmerman", "Holloway", "Pritchard", "Caldwell", "Donovan", "Fairbanks", "Langley",
];

const COMPANY_SUFFIXES: [&str; 7] = ["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons", "Holdings"];

const WORDS: [&str; 64] = [
    "account", "balance", "ledger", "transfer", "invoice", "payment", "settlement", "clearing",
    "branch", "credit", "debit", "reserve", "margin", "escrow", "payroll", "vendor",
    "client", "portfolio", "deposit", "interest", "quarter", "annual", "monthly", "review",
    "approve", "process", "reconcile", "schedule", "forward", "return", "adjust", "record",
    "fund", "capital", "asset", "liability", "budget", "forecast", "audit", "report",
    "statement", "charge", "fee", "refund", "rebate", "exchange", "currency", "wire",
    "cheque", "card", "online", "mobile", "retail", "corporate", "treasury", "operations",
    "customer", "service", "order", "supply", "contract", "lease", "rental", "utility",
];

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// IBAN country codes with the BBAN length used for fabricated accounts.
const IBAN_COUNTRIES: [(&str, usize); 5] = [("GB", 18), ("DE", 18), ("FR", 23), ("NL", 14), ("ES", 20)];

/// Pick one entry of a non-empty slice.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn letters<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn alphanumerics<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char)
        .collect()
}

/// A string of `count` random decimal digits.
pub fn digits<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// A company name such as `Mercer Holdings` or `Keller, Nolan and Quinn`.
pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, &SURNAMES), pick(rng, &COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, &SURNAMES), pick(rng, &SURNAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, &SURNAMES),
            pick(rng, &SURNAMES),
            pick(rng, &SURNAMES)
        ),
    }
}

/// A single lowercase word.
pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, &WORDS).to_string()
}

/// A capitalized sentence of 4 to 10 words ending in a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(4..=10);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, &WORDS)).collect();
    let text = words.join(" ");

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_ascii_uppercase(), chars.as_str()),
        None => String::from("."),
    }
}

/// A random version 4 UUID.
pub fn uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

/// A domestic bank account number: four bank letters and twelve digits.
pub fn bban<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", letters(rng, 4), digits(rng, 12))
}

/// An IBAN with valid ISO 13616 check digits.
pub fn iban<R: Rng + ?Sized>(rng: &mut R) -> String {
    let (country, bban_len) = IBAN_COUNTRIES[rng.gen_range(0..IBAN_COUNTRIES.len())];
    let bban = format!("{}{}", letters(rng, 4), digits(rng, bban_len - 4));
    let check = 98 - iban_remainder(&format!("{}{}00", bban, country));
    format!("{}{:02}{}", country, check, bban)
}

/// Mod-97 of an IBAN string with letters expanded to two digits (A=10 .. Z=35).
fn iban_remainder(value: &str) -> u32 {
    value.chars().fold(0u32, |acc, c| match c.to_digit(36) {
        Some(d) if d >= 10 => (acc * 100 + d) % 97,
        Some(d) => (acc * 10 + d) % 97,
        None => acc,
    })
}

/// A SWIFT/BIC code, 8 or 11 characters.
pub fn swift<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = format!(
        "{}{}{}",
        letters(rng, 4),
        pick(rng, &["GB", "DE", "FR", "NL", "ES", "US"]),
        alphanumerics(rng, 2)
    );
    if rng.gen_bool(0.5) {
        code.push_str(&alphanumerics(rng, 3));
    }
    code
}

/// A time of day formatted `HH:MM:SS`.
pub fn time_of_day<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn iban_is_valid(iban: &str) -> bool {
        let (head, tail) = iban.split_at(4);
        iban_remainder(&format!("{}{}", tail, head)) == 1
    }

    #[test]
    fn test_iban_check_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let iban = iban(&mut rng);
            assert!(iban_is_valid(&iban), "invalid IBAN {}", iban);
            assert!(iban[..2].chars().all(|c| c.is_ascii_uppercase()));
            assert!(iban[2..4].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_known_iban_is_valid() {
        assert!(iban_is_valid("GB82WEST12345698765432"));
        assert!(!iban_is_valid("GB83WEST12345698765432"));
    }

    #[test]
    fn test_bban_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let bban = bban(&mut rng);
        assert_eq!(bban.len(), 16);
        assert!(bban[..4].chars().all(|c| c.is_ascii_uppercase()));
        assert!(bban[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_swift_format() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let code = swift(&mut rng);
            assert!(code.len() == 8 || code.len() == 11, "bad length {}", code);
            assert!(code[..6].chars().all(|c| c.is_ascii_uppercase()));
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_sentence_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let sentence = sentence(&mut rng);
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
            let words = sentence.trim_end_matches('.').split(' ').count();
            assert!((4..=10).contains(&words));
        }
    }

    #[test]
    fn test_uuid_is_v4() {
        let mut rng = StdRng::seed_from_u64(5);
        let parsed = uuid::Uuid::parse_str(&uuid(&mut rng)).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_time_of_day_format() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let time = time_of_day(&mut rng);
            let parts: Vec<u32> = time.split(':').map(|p| p.parse().unwrap()).collect();
            assert_eq!(time.len(), 8);
            assert!(parts[0] < 24 && parts[1] < 60 && parts[2] < 60);
        }
    }

    #[test]
    fn test_digits_and_company() {
        let mut rng = StdRng::seed_from_u64(13);
        let number = digits(&mut rng, 12);
        assert_eq!(number.len(), 12);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(!company(&mut rng).is_empty());
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(company(&mut a), company(&mut b));
        assert_eq!(iban(&mut a), iban(&mut b));
    }
}

use crate::domain::ports::IdGenerator;
use rand::Rng;
use uuid::Uuid;

const ACCOUNT_NUMBER_LEN: usize = 20;
const CARD_NUMBER_LEN: usize = 16;
const CARD_PREFIX: u32 = 4;

/// UUIDv4 identifiers and random digit strings for account/card numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

fn random_digits(len: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0..10)).collect()
}

fn render(digits: &[u32]) -> String {
    digits
        .iter()
        .filter_map(|d| char::from_digit(*d, 10))
        .collect()
}

/// Luhn check digit for `payload` (all digits except the check digit).
pub fn luhn_check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    (10 - sum % 10) % 10
}

pub fn is_luhn_valid(number: &str) -> bool {
    let digits: Option<Vec<u32>> = number.chars().map(|c| c.to_digit(10)).collect();
    match digits {
        Some(digits) if digits.len() > 1 => {
            let (payload, check) = digits.split_at(digits.len() - 1);
            luhn_check_digit(payload) == check[0]
        }
        _ => false,
    }
}

impl IdGenerator for RandomIdGenerator {
    fn id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn account_number(&self) -> String {
        render(&random_digits(ACCOUNT_NUMBER_LEN))
    }

    fn card_number(&self) -> String {
        let mut digits = vec![CARD_PREFIX];
        digits.extend(random_digits(CARD_NUMBER_LEN - 2));
        digits.push(luhn_check_digit(&digits));
        render(&digits)
    }

    fn cvv(&self) -> String {
        render(&random_digits(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_luhn_known_number() {
        assert!(is_luhn_valid("4539578763621486"));
        assert!(!is_luhn_valid("4539578763621487"));
        assert!(!is_luhn_valid("45x9"));
    }

    #[test]
    fn test_generated_numbers_have_expected_shape() {
        let ids = RandomIdGenerator;
        let account = ids.account_number();
        assert_eq!(account.len(), ACCOUNT_NUMBER_LEN);
        assert!(account.chars().all(|c| c.is_ascii_digit()));

        let card = ids.card_number();
        assert_eq!(card.len(), CARD_NUMBER_LEN);
        assert!(card.starts_with('4'));
        assert!(is_luhn_valid(&card));

        assert_eq!(ids.cvv().len(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids = RandomIdGenerator;
        let set: HashSet<String> = (0..1000).map(|_| ids.id()).collect();
        assert_eq!(set.len(), 1000);
    }
}

// CNPJ check-digit validation
// Standard weighted modulo-11 scheme over the 12-digit base, two passes.

use crate::mask::strip_digits;

/// Compute one check digit over `digits` with descending weights
/// starting at `start_weight`, wrapping back to 9 below 2.
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let mut weight = start_weight;
    let mut sum = 0;
    for &d in digits {
        sum += d * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }
    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        11 - rem
    }
}

/// Validate a CNPJ's two check digits.
///
/// Accepts masked or unmasked input; everything that is not a digit is
/// stripped first. Pure pass/fail, no side effects.
pub fn validate_cnpj(cnpj: &str) -> bool {
    let cleaned = strip_digits(cnpj);
    if cleaned.len() != 14 {
        return false;
    }

    let digits: Vec<u32> = cleaned.chars().filter_map(|c| c.to_digit(10)).collect();

    // Degenerate sequences like 00000000000000 satisfy the checksum
    // but are never issued.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let dv1 = check_digit(&digits[..12], 5);
    if dv1 != digits[12] {
        return false;
    }

    let dv2 = check_digit(&digits[..13], 6);
    dv2 == digits[13]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_cnpj() {
        assert!(validate_cnpj("11222333000181"));
        // Masked form validates too
        assert!(validate_cnpj("11.222.333/0001-81"));
    }

    #[test]
    fn test_single_digit_corruption_fails() {
        assert!(!validate_cnpj("11222333000180"));
        assert!(!validate_cnpj("11222333000171"));
        assert!(!validate_cnpj("11222334000181"));
    }

    #[test]
    fn test_rejects_repeated_digits() {
        for d in '0'..='9' {
            let repeated: String = std::iter::repeat(d).take(14).collect();
            assert!(!validate_cnpj(&repeated), "accepted {}", repeated);
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!validate_cnpj(""));
        assert!(!validate_cnpj("1122233300018"));
        assert!(!validate_cnpj("112223330001811"));
    }

    #[test]
    fn test_check_digit_weights() {
        // First pass over 112223330001: weights 5,4,3,2,9,8,7,6,5,4,3,2
        let base = [1, 1, 2, 2, 2, 3, 3, 3, 0, 0, 0, 1];
        assert_eq!(check_digit(&base, 5), 8);

        // Second pass includes the first check digit, starting weight 6
        let with_dv1 = [1, 1, 2, 2, 2, 3, 3, 3, 0, 0, 0, 1, 8];
        assert_eq!(check_digit(&with_dv1, 6), 1);
    }

    #[test]
    fn test_check_digit_low_remainder_is_zero() {
        // Any sum with remainder 0 or 1 maps to check digit 0
        let zeros = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(check_digit(&zeros, 5), 0);
    }
}

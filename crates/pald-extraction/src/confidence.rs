//! Confidence scoring, ported from `_calculate_extraction_confidence`
//! (`original_source/src/logic/pald_light_extraction.py`).

pub fn calculate_confidence(filled: usize, total: usize, input_len: usize) -> f64 {
    if total == 0 || input_len == 0 {
        return 0.0;
    }

    let mut fill_rate = (filled as f64 / total as f64).min(1.0);
    if filled <= 1 {
        fill_rate *= 0.3;
    } else if filled <= 3 {
        fill_rate *= 0.6;
    }

    let text_length_factor = (input_len as f64 / 500.0).min(1.0);
    let confidence = fill_rate * 0.8 + text_length_factor * 0.2;
    (confidence * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_or_empty_input_yields_zero() {
        assert_eq!(calculate_confidence(0, 0, 10), 0.0);
        assert_eq!(calculate_confidence(3, 10, 0), 0.0);
    }

    #[test]
    fn low_fill_count_is_penalized() {
        let low = calculate_confidence(1, 20, 500);
        let higher = calculate_confidence(4, 20, 500);
        assert!(low < higher);
    }

    #[test]
    fn confidence_in_bounds() {
        let c = calculate_confidence(20, 20, 1000);
        assert!((0.0..=1.0).contains(&c));
    }
}

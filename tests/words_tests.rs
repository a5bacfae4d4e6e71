use billing::invoice::{amount_in_words, to_words};

#[test]
fn test_zero_is_spelled_out() {
    assert_eq!(to_words(0), "Zero");
}

#[test]
fn test_units_and_teens() {
    assert_eq!(to_words(1), "One");
    assert_eq!(to_words(9), "Nine");
    assert_eq!(to_words(10), "Ten");
    assert_eq!(to_words(19), "Nineteen");
}

#[test]
fn test_tens_with_and_without_units() {
    assert_eq!(to_words(20), "Twenty");
    assert_eq!(to_words(21), "Twenty One");
    assert_eq!(to_words(90), "Ninety");
    assert_eq!(to_words(99), "Ninety Nine");
}

#[test]
fn test_hundreds() {
    assert_eq!(to_words(100), "One Hundred");
    assert_eq!(to_words(105), "One Hundred and Five");
    assert_eq!(to_words(110), "One Hundred and Ten");
    assert_eq!(to_words(999), "Nine Hundred and Ninety Nine");
}

#[test]
fn test_thousands_skip_empty_groups() {
    assert_eq!(to_words(1000), "One Thousand");
    assert_eq!(to_words(1005), "One Thousand Five");
    assert_eq!(
        to_words(12_345),
        "Twelve Thousand Three Hundred and Forty Five"
    );
    assert_eq!(to_words(500_000), "Five Hundred Thousand");
}

#[test]
fn test_higher_scales_group_by_thousands() {
    // Receipts label the millions group "Lakh" and the billions group "Crore"
    assert_eq!(to_words(1_000_000), "One Lakh");
    assert_eq!(to_words(2_000_005), "Two Lakh Five");
    assert_eq!(to_words(1_000_000_000), "One Crore");
    assert_eq!(
        to_words(u32::MAX),
        "Four Crore Two Hundred and Ninety Four Lakh Nine Hundred and Sixty Seven Thousand \
         Two Hundred and Ninety Five"
    );
}

#[test]
fn test_no_stray_whitespace() {
    for n in [1, 15, 100, 1000, 1001, 1_000_000, 1_000_001, 123_456_789] {
        let words = to_words(n);
        assert_eq!(words, words.trim(), "{n}");
        assert!(!words.contains("  "), "{n}: {words:?}");
    }
}

#[test]
fn test_amount_in_words_drops_fraction() {
    assert_eq!(amount_in_words(500.0), "Five Hundred");
    assert_eq!(amount_in_words(500.75), "Five Hundred");
    assert_eq!(amount_in_words(0.4), "Zero");
}

#[test]
fn test_amount_in_words_saturates() {
    assert_eq!(amount_in_words(-3.0), "Zero");
    assert_eq!(amount_in_words(f64::NAN), "Zero");
    assert_eq!(amount_in_words(1e12), to_words(u32::MAX));
    assert_eq!(amount_in_words(4_294_967_296.0), to_words(u32::MAX));
    assert_eq!(amount_in_words(4_294_967_295.9), to_words(u32::MAX));
}

/// Sentrix beadchip barcode: 10 to 12 ASCII digits.
pub fn is_valid_barcode(barcode: &str) -> bool {
    (10..=12).contains(&barcode.len()) && barcode.bytes().all(|b| b.is_ascii_digit())
}

/// Sentrix position: `R##C##`, exactly two digits each.
pub fn is_valid_position(position: &str) -> bool {
    let b = position.as_bytes();
    b.len() == 6
        && b[0] == b'R'
        && b[1].is_ascii_digit()
        && b[2].is_ascii_digit()
        && b[3] == b'C'
        && b[4].is_ascii_digit()
        && b[5].is_ascii_digit()
}

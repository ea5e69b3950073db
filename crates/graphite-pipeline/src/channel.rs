//! Conversion of intermediate arithmetic back into 8-bit channels.

/// Round to the nearest integer and clamp into `0..=255`.
///
/// Every filter funnels its floating-point results through here, so
/// channel values stay valid regardless of the input domain.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

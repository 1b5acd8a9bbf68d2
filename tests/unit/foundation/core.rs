use super::*;

#[test]
fn hex_parses_rgb_and_rgba() {
    assert_eq!(Rgba8::from_hex("#1e1f2a"), Some(Rgba8::rgb(0x1e, 0x1f, 0x2a)));
    assert_eq!(
        Rgba8::from_hex("ffffff80"),
        Some(Rgba8::rgba(255, 255, 255, 0x80))
    );
    assert_eq!(Rgba8::from_hex("#fff"), None);
    assert_eq!(Rgba8::from_hex("#gg0000"), None);
    assert_eq!(Rgba8::from_hex("#ééé"), None);
}

#[test]
fn premul_roundtrip_keeps_opaque_pixels() {
    let c = Rgba8::rgb(12, 200, 99);
    let mut px = c.to_premul();
    assert_eq!(px, [12, 200, 99, 255]);
    unpremultiply_in_place(&mut px);
    assert_eq!(px, [12, 200, 99, 255]);
}

#[test]
fn unpremultiply_zero_alpha_clears_colour() {
    let mut px = [10u8, 20, 30, 0];
    unpremultiply_in_place(&mut px);
    assert_eq!(px, [0, 0, 0, 0]);
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#ff000080\"").unwrap();
    assert_eq!(c, Rgba8::rgba(255, 0, 0, 0x80));
    assert_eq!(serde_json::to_string(&Rgba8::rgb(0, 0, 255)).unwrap(), "\"#0000ff\"");
    assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
}

//! Integration tests for compiled format strings.
//!
//! These exercise the public API end to end: compile a format string, then
//! format values and resolve cell styles the way a grid host would.

use gridformat::{
    compile, set_theme_detector, ColorMode, CompiledFormat, FormatCache, FormatSpec, Formatter,
    StyleMap, ThemeChoice, Value,
};
use serial_test::serial;

fn light_style(fmt: &CompiledFormat, value: Value<'_>) -> Option<StyleMap> {
    fmt.style_for_mode(&value, &StyleMap::new(), ColorMode::Light)
}

// ============================================================================
// Conditional sections
// ============================================================================

#[test]
fn test_green_red_conditional_format() {
    let fmt = compile("[>0][Green]#,##0.00;[<0][Red]#,##0.00;#,##0.00");

    assert_eq!(fmt.format(&Value::Number(150.0)), "150.00");
    let green = light_style(&fmt, Value::Number(150.0)).unwrap();
    assert_eq!(green.get("color"), Some("#16A34A"));

    assert_eq!(fmt.format(&Value::Number(-50.0)), "-50.00");
    let red = light_style(&fmt, Value::Number(-50.0)).unwrap();
    assert_eq!(red.get("color"), Some("#DC2626"));

    assert_eq!(fmt.format(&Value::Number(0.0)), "0.00");
    assert_eq!(light_style(&fmt, Value::Number(0.0)), None);
}

#[test]
fn test_accounting_negative_in_parentheses() {
    let fmt = compile("#,##0.00;[Red](#,##0.00)");
    assert_eq!(fmt.format(&Value::Number(-1234.5)), "(1,234.50)");
    assert_eq!(fmt.format(&Value::Number(1234.5)), "1,234.50");
    assert_eq!(fmt.format(&Value::Number(0.0)), "0.00");
}

#[test]
fn test_four_section_text_role() {
    let fmt = compile(r#"0;-0;"zero";[Upper]"text: "@"#);
    assert_eq!(fmt.format(&Value::Number(3.0)), "3");
    assert_eq!(fmt.format(&Value::Number(-3.0)), "-3");
    assert_eq!(fmt.format(&Value::Number(0.0)), "zero");
    assert_eq!(fmt.format(&Value::Text("abc")), "text: ABC");
}

#[test]
fn test_threshold_bands() {
    let fmt = compile(r#"[>=90][Green]0"%";[>=50][Orange]0"%";[Red]0"%""#);
    assert_eq!(fmt.format(&Value::Number(95.0)), "95%");

    let mid = light_style(&fmt, Value::Number(60.0)).unwrap();
    assert_eq!(mid.get("color"), Some("#EA580C"));

    let low = light_style(&fmt, Value::Number(10.0)).unwrap();
    assert_eq!(low.get("color"), Some("#DC2626"));
}

#[test]
fn test_equality_uses_epsilon() {
    let fmt = compile(r#"[=0.3]"exact";0.00"#);
    assert_eq!(fmt.format(&Value::Number(0.1 + 0.2)), "exact");
}

#[test]
fn test_numeric_text_is_treated_as_number() {
    let fmt = compile("[>0][Green]0.0;[Red]0.0");
    assert_eq!(fmt.format(&Value::Text("2.25")), "2.3");
    assert!(light_style(&fmt, Value::Text("2.25")).is_some());
}

// ============================================================================
// Number patterns
// ============================================================================

#[test]
fn test_percent() {
    assert_eq!(compile("0.00%").format(&Value::Number(0.1234)), "12.34%");
}

#[test]
fn test_k_scale() {
    let fmt = compile(r#"[<1000000]0.0,"K";#,##0"#);
    assert_eq!(fmt.format(&Value::Number(1500.0)), "1.5K");
    assert_eq!(fmt.format(&Value::Number(2500000.0)), "2,500,000");

    assert_eq!(compile("0.0K").format(&Value::Number(1500.0)), "1.5K");
}

#[test]
fn test_currency_prefix() {
    assert_eq!(
        compile("$#,##0.00").format(&Value::Number(1234.567)),
        "$1,234.57"
    );
    assert_eq!(
        compile("[$€-407]#,##0.00").format(&Value::Number(5.0)),
        "€5.00"
    );
}

#[test]
fn test_fractions() {
    assert_eq!(compile("# ??/32").format(&Value::Number(99.5)), "99-16");
    assert_eq!(compile("# ?/?").format(&Value::Number(1.5)), "1 1/2");
}

#[test]
fn test_scientific() {
    assert_eq!(
        compile("0.00E+00").format(&Value::Number(123456.0)),
        "1.23E+05"
    );
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_dates_from_every_value_kind() {
    let fmt = compile("yyyy-mm-dd");
    let date = chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    assert_eq!(fmt.format(&Value::Date(date)), "2024-02-29");
    assert_eq!(fmt.format(&Value::Text("2024-02-29T10:00:00Z")), "2024-02-29");
    // 2024-02-29T00:00:00Z in epoch milliseconds
    assert_eq!(fmt.format(&Value::Number(1_709_164_800_000.0)), "2024-02-29");
}

#[test]
fn test_time_with_meridiem() {
    let fmt = compile("h:mm AM/PM");
    assert_eq!(fmt.format(&Value::Text("2024-01-01 18:45:00")), "6:45 PM");
}

#[test]
fn test_unparseable_date_falls_back() {
    assert_eq!(compile("dd/mm/yyyy").format(&Value::Text("tomorrow")), "tomorrow");
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_upper() {
    assert_eq!(compile("[Upper]@").format(&Value::Text("hello")), "HELLO");
}

#[test]
fn test_truncate() {
    assert_eq!(
        compile("[Truncate:5]@").format(&Value::Text("Hello World")),
        "Hello…"
    );
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(
        compile("[Truncate:2]@").format(&Value::Text("日本語")),
        "日本…"
    );
}

#[test]
fn test_bare_transform_implies_value() {
    assert_eq!(
        compile("[Snake]").format(&Value::Text("Customer Name")),
        "customer_name"
    );
}

#[test]
fn test_text_pattern_with_number_value() {
    assert_eq!(compile(r##""#"@"##).format(&Value::Number(7.0)), "#7");
}

// ============================================================================
// Styles
// ============================================================================

#[test]
fn test_style_keywords() {
    let fmt = compile("[Bold][Italic][Underline][Center][BG:#FFEEEE][Size:14][Padding:2px 4px]@");
    let style = light_style(&fmt, Value::Text("x")).unwrap();

    assert_eq!(style.get("font-weight"), Some("700"));
    assert_eq!(style.get("font-style"), Some("italic"));
    assert_eq!(style.get("text-decoration"), Some("underline"));
    assert_eq!(style.get("text-align"), Some("center"));
    assert_eq!(style.get("background-color"), Some("#FFEEEE"));
    assert_eq!(style.get("font-size"), Some("14px"));
    assert_eq!(style.get("padding"), Some("2px 4px"));
}

#[test]
fn test_unknown_directive_is_ignored() {
    let fmt = compile("[Sparkle]0.0");
    assert_eq!(fmt.format(&Value::Number(1.0)), "1.0");
    assert_eq!(light_style(&fmt, Value::Number(1.0)), None);
}

#[test]
fn test_base_style_merge() {
    let base = StyleMap::new()
        .with("color", "#111111")
        .with("border", "1px solid #ccc");
    let fmt = CompiledFormat::with_base_style("[>0][Green]0;0", base);

    let positive = fmt.style(&Value::Number(1.0)).unwrap();
    assert_ne!(positive.get("color"), Some("#111111"));
    assert_eq!(positive.get("border"), Some("1px solid #ccc"));

    let negative = fmt.style(&Value::Number(-1.0)).unwrap();
    assert_eq!(negative.get("color"), Some("#111111"));
}

#[test]
#[serial]
fn test_style_for_follows_detected_mode() {
    let fmt = compile("[Blue]0");

    set_theme_detector(|| ColorMode::Dark);
    let dark = fmt.style_for(&Value::Number(1.0), &StyleMap::new()).unwrap();
    assert_eq!(dark.get("color"), Some("#60A5FA"));

    set_theme_detector(|| ColorMode::Light);
    let light = fmt.style_for(&Value::Number(1.0), &StyleMap::new()).unwrap();
    assert_eq!(light.get("color"), Some("#2563EB"));

    gridformat::theme::reset_theme_detector();
}

// ============================================================================
// Failure behaviour
// ============================================================================

#[test]
fn test_malformed_formats_do_not_panic() {
    for raw in [r#"0.00 "abc"#, "[Red", "0]", "[[Bold]]0", r#"[>0"#] {
        let fmt = compile(raw);
        assert!(fmt.error().is_some(), "{raw} should be malformed");
        assert_eq!(fmt.format(&Value::Number(42.5)), "42.5");
        assert_eq!(fmt.format(&Value::Text("raw")), "raw");
        assert_eq!(light_style(&fmt, Value::Number(1.0)), None);
    }
}

// ============================================================================
// Persistence, caching and callbacks
// ============================================================================

#[test]
fn test_spec_round_trip() {
    let original = CompiledFormat::with_base_style(
        r#"[>0][Green][Bold]#,##0.00;[<0][Red](#,##0.00);"-";[Title]@"#,
        StyleMap::new().with("font-size", "12px"),
    );
    let json = serde_json::to_string(&original.spec()).unwrap();
    let restored = serde_json::from_str::<FormatSpec>(&json).unwrap().compile();

    let values = [
        Value::Number(1234.5),
        Value::Number(-0.5),
        Value::Number(0.0),
        Value::Text("big deal"),
        Value::Null,
    ];
    for value in values {
        assert_eq!(original.format(&value), restored.format(&value));
        for mode in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(
                original.style_for_mode(&value, original.base_style(), mode),
                restored.style_for_mode(&value, restored.base_style(), mode)
            );
        }
    }
}

#[test]
fn test_callbacks_behave_like_compiled() {
    let fmt = compile("[Red]0.0");
    let callbacks = fmt.callbacks();
    let value = Value::Number(2.0);

    assert_eq!((callbacks.format)(&value), fmt.format(&value));
    assert_eq!(callbacks.source, "[Red]0.0");
    assert_eq!(callbacks.spec(), fmt.spec());

    let handle = std::thread::spawn(move || (callbacks.format)(&Value::Number(3.0)));
    assert_eq!(handle.join().unwrap(), "3.0");
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = std::sync::Arc::new(FormatCache::new(16));
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let cache = std::sync::Arc::clone(&cache);
            std::thread::spawn(move || {
                let fmt = cache.compile("#,##0", StyleMap::new());
                fmt.format(&Value::Number(1000.0 * f64::from(i)))
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["0", "1,000", "2,000", "3,000"]);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_formatter_facade() {
    let formatter = Formatter::builder()
        .theme(ThemeChoice::Fixed(ColorMode::Light))
        .build();
    assert_eq!(formatter.format("0.0%", &Value::Number(0.5)), "50.0%");
    assert_eq!(
        formatter
            .style_for("[Purple]@", &Value::Text("x"), &StyleMap::new())
            .and_then(|s| s.get("color").map(str::to_string)),
        Some("#9333EA".to_string())
    );
}

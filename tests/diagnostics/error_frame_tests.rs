use rspack_stats::diagnostics::{FrameError, format_error_frame, get_source_line};

fn ten_line_source() -> String {
    let mut source = String::new();
    for i in 1..10 {
        source.push_str(&format!("let v{i} = {i};\n"));
    }
    source.push_str("  return value;\n");
    source
}

#[test]
fn gutter_widens_with_the_line_number() {
    let source = ten_line_source();
    let frame = format_error_frame("./src/deep.js", 10, 3, &source, 6).unwrap();

    insta::assert_snapshot!(frame, @r"
       ┌─ ./src/deep.js:10:3
       │
    10 │   return value;
       │   ^^^^^^
    ");
}

#[test]
fn carets_align_by_character_not_byte() {
    let source = "const café = '☕'; oops\n";
    let frame = format_error_frame("./cafe.js", 1, 19, source, 4).unwrap();

    let caret_line = frame.lines().last().unwrap();
    assert_eq!(caret_line, format!("  │ {}^^^^", " ".repeat(18)));

    let text = get_source_line(source, 1).unwrap();
    let under: String = text.chars().skip(18).take(4).collect();
    assert_eq!(under, "oops");
}

#[test]
fn zero_length_renders_one_caret() {
    let frame = format_error_frame("./a.js", 2, 1, "a\nb\n", 0).unwrap();
    assert_eq!(frame, "  ┌─ ./a.js:2:1\n  │\n2 │ b\n  │ ^");
}

#[test]
fn frame_has_no_trailing_newline() {
    let frame = format_error_frame("./a.js", 1, 1, "x;\n", 1).unwrap();
    assert!(!frame.ends_with('\n'));
    assert_eq!(frame.lines().count(), 4);
}

#[test]
fn lines_outside_the_source_are_errors() {
    let err = format_error_frame("./a.js", 5, 1, "one\ntwo", 1).unwrap_err();
    assert_eq!(
        err,
        FrameError::LineOutOfRange {
            line: 5,
            available: 2
        }
    );
    assert_eq!(
        err.to_string(),
        "line 5 is out of range: source has 2 line(s)"
    );
}

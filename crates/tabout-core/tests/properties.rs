use tabout_core::matcher::{Direction, match_compound, matches};
use tabout_core::{MathDetector, Navigator, StringBuffer, TextBuffer, Vocabulary};

fn forward(navigator: &Navigator, buffer: &mut StringBuffer) -> bool {
    let context = MathDetector::new(buffer.text(), buffer.cursor());
    navigator.tabout(buffer, &context)
}

fn backward(navigator: &Navigator, buffer: &mut StringBuffer) -> bool {
    let context = MathDetector::new(buffer.text(), buffer.cursor());
    navigator.reverse_tabout(buffer, &context)
}

#[test]
fn test_longest_match_over_configured_order() {
    // Tokens are given shortest-first; the vocabulary still prefers `]]`.
    let vocabulary = Vocabulary::new(&["("], &["]", "]]"], &["\\left"], &["\\right"], &["(", ")"])
        .unwrap();
    let navigator = Navigator::new(vocabulary);
    let mut buffer = StringBuffer::from_marked("$a‸]]$");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$a]]‸$");
}

#[test]
fn test_longest_sizing_command_is_one_unit() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked(r"$x \Biggl( a‸$");
    assert!(backward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), r"$x ‸\Biggl( a$");
}

#[test]
fn test_command_boundary_safety() {
    assert!(!matches(r"\lefttail", "\\left", 0, Direction::Forward));

    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked(r"$a \lefttail( b‸$");
    assert!(backward(&navigator, &mut buffer));
    assert_eq!(buffer.cursor(), 12);
}

#[test]
fn test_compound_fallback_length() {
    let vocabulary = Vocabulary::default();
    let len = match_compound(
        r"\left ",
        vocabulary.left_commands(),
        vocabulary.delimiters(),
        0,
        Direction::Forward,
    );
    assert_eq!(len, 5);
}

#[test]
fn test_round_trip_never_passes_the_opening() {
    let navigator = Navigator::default();
    let cases = [
        ("$(‸x) + y$", 1),
        (r"$a \left[‸ b \right] c$", 3),
        (r"$\{‸ a \}$", 1),
        (r"$x \bigl(‸ y \bigr) z$", 3),
        ("$$\n[‸a, b]\n$$", 3),
    ];
    for (marked, opening) in cases {
        let mut buffer = StringBuffer::from_marked(marked);
        assert!(forward(&navigator, &mut buffer), "tabout failed for {:?}", marked);
        assert!(backward(&navigator, &mut buffer), "reverse failed for {:?}", marked);
        assert!(
            buffer.cursor() <= opening,
            "{:?} came back to {}, past the opening at {}",
            marked,
            buffer.cursor(),
            opening
        );
    }
}

#[test]
fn test_round_trip_inside_nested_pair() {
    // The forward scan stops at the first closer, the inner `)`. Going back
    // from there the nearest opening is the inner `(`, so the cursor returns
    // to where it started, just after the outer `(`.
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("$(‸(a) b)$");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$((a)‸ b)$");
    assert!(backward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$(‸(a) b)$");
}

#[test]
fn test_edge_exit_is_idempotent() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("$x‸$ after");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$x$‸ after");

    assert!(!forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$x$‸ after");
}

#[test]
fn test_pair_skipping() {
    let navigator = Navigator::default();
    let text = r"$\left( x \right) y)$";
    let mut buffer = StringBuffer::with_cursor(text, 1);
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.cursor(), text.len() - 1);
}

#[test]
fn test_region_exit_creates_one_line() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("$$\na\nb‸\n$$");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$$\na\nb\n$$\n‸");

    // Exit again, this time from right before the closer.
    buffer.set_cursor(7);
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "$$\na\nb\n$$\n‸");
    assert_eq!(buffer.line_count(), 5);
}

#[test]
fn test_backward_then_forward_exit_from_block() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("intro\n$$\n‸x\n$$\noutro");
    assert!(backward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "intro‸\n$$\nx\n$$\noutro");
    assert!(!forward(&navigator, &mut buffer));
}

#[test]
fn test_fenced_math_round_trip() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("```math\n(a‸)\n```\n");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "```math\n(a)‸\n```\n");
    assert!(forward(&navigator, &mut buffer));
    assert_eq!(buffer.render(), "```math\n(a)\n‸```\n");
}

#[test]
fn test_close_bracket_falls_through_outside_math() {
    let navigator = Navigator::default();
    let mut buffer = StringBuffer::from_marked("f(x‸)");
    let context = MathDetector::new(buffer.text(), buffer.cursor());
    assert!(!navigator.close_bracket(&mut buffer, &context, ')'));
    assert_eq!(buffer.cursor(), 3);
}

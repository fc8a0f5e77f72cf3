#![no_main]
use libfuzzer_sys::fuzz_target;
use tabout_core::{MathDetector, MathRegion, Navigator, StringBuffer, TextBuffer};
use tabout_core::{reverse, tabout};

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the cursor, the rest is the document.
    if data.len() < 2 {
        return;
    }
    let text = String::from_utf8_lossy(&data[2..]).into_owned();
    let cursor = usize::from(u16::from_le_bytes([data[0], data[1]])) % (text.len() + 1);
    let navigator = Navigator::default();

    for forward in [true, false] {
        let mut buffer = StringBuffer::with_cursor(text.clone(), cursor);
        let context = MathDetector::new(buffer.text(), buffer.cursor());
        if forward {
            navigator.tabout(&mut buffer, &context);
        } else {
            navigator.reverse_tabout(&mut buffer, &context);
        }
        assert!(buffer.cursor() <= buffer.text().len());
    }

    // Arbitrary regions, including ones that are not on char boundaries.
    let region = MathRegion::block(cursor / 2, text.len());
    let vocabulary = navigator.vocabulary();
    let _ = tabout::find_closing(&text, &region, cursor, vocabulary);
    let _ = reverse::find_opening(&text, &region, cursor, vocabulary);
});
